//! Label mapping files: two named columns of a CSV/TSV file.

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use mapvis_model::LabelMapping;

use crate::error::{IngestError, Result};

pub const DEFAULT_SOURCE_COLUMN: &str = "source";
pub const DEFAULT_TARGET_COLUMN: &str = "target";

/// Tab for `.tsv`/`.tab` files, comma otherwise.
pub fn delimiter_for_path(path: &Path) -> u8 {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("tsv" | "tab") => b'\t',
        _ => b',',
    }
}

pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}').trim().to_string()
}

/// Loads a mapping from `source_col` to `target_col`, with the delimiter
/// picked by [`delimiter_for_path`].
pub fn load_label_mapping(path: &Path, source_col: &str, target_col: &str) -> Result<LabelMapping> {
    load_label_mapping_with_delimiter(path, source_col, target_col, delimiter_for_path(path))
}

/// Loads a mapping with an explicit field delimiter.
///
/// Values are trimmed. Empty lines are ignored by the CSV reader, but a row
/// whose fields are all blank is rejected like any other blank label.
/// Duplicate keys are accepted only when they map to the same consensus label.
pub fn load_label_mapping_with_delimiter(
    path: &Path,
    source_col: &str,
    target_col: &str,
    delimiter: u8,
) -> Result<LabelMapping> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::csv(path, e))?
        .iter()
        .map(normalize_header)
        .collect();
    let position = |column: &str| {
        headers
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| {
                IngestError::missing_column(
                    path.display().to_string(),
                    column,
                    headers.iter().map(String::as_str),
                )
            })
    };
    let source_idx = position(source_col)?;
    let target_idx = position(target_col)?;

    let name = path.display().to_string();
    let mut mapping = LabelMapping::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::csv(path, e))?;
        let source = record.get(source_idx).unwrap_or("");
        let target = record.get(target_idx).unwrap_or("");
        mapping
            .insert(&name, source, target)
            .map_err(|source| IngestError::Mapping {
                path: path.to_path_buf(),
                source,
            })?;
    }
    debug!(
        path = %path.display(),
        entries = mapping.len(),
        consensus = mapping.consensus_labels().len(),
        "loaded label mapping"
    );
    Ok(mapping)
}
