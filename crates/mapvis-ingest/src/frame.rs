//! Feature tables read through polars.

use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use mapvis_model::FeatureRow;

use crate::error::{IngestError, Result};

/// Reads a delimited feature table with every column typed as a string, so
/// identifiers such as `"01"` keep their leading zeros.
pub fn read_feature_frame(path: &Path, delimiter: u8) -> Result<DataFrame> {
    let table = path.display().to_string();
    if !path.is_file() {
        return Err(IngestError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a file"),
        ));
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|options| options.with_separator(delimiter))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::polars(&table, e))?
        .finish()
        .map_err(|e| IngestError::polars(&table, e))?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read feature table"
    );
    Ok(df)
}

fn string_column(df: &DataFrame, table: &str, name: &str) -> Result<Vec<String>> {
    let column = df.column(name).map_err(|_| {
        IngestError::missing_column(
            table,
            name,
            df.get_column_names().into_iter().map(|n| n.as_str()),
        )
    })?;
    let column = column
        .cast(&DataType::String)
        .map_err(|e| IngestError::polars(table, e))?;
    let values = column.str().map_err(|e| IngestError::polars(table, e))?;
    Ok(values
        .iter()
        .map(|value| value.map(str::to_string).unwrap_or_default())
        .collect())
}

/// Extracts protein/RNA pairs from two named columns.
///
/// Nulls become empty strings, which reconciliation later rejects with the
/// offending row number.
pub fn feature_rows_from_frame(
    df: &DataFrame,
    protein_col: &str,
    rna_col: &str,
) -> Result<Vec<FeatureRow>> {
    let table = "feature table";
    let proteins = string_column(df, table, protein_col)?;
    let rnas = string_column(df, table, rna_col)?;
    Ok(proteins
        .into_iter()
        .zip(rnas)
        .map(|(protein, rna)| FeatureRow::new(protein, rna))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_frame_order() {
        let df = df! {
            "Protein name" => &["CD45RA", "CD45RO", "Cytokeratin"],
            "RNA name" => &["PTPRC", "PTPRC", "KRT1/KRT10"],
        }
        .unwrap();
        let rows = feature_rows_from_frame(&df, "Protein name", "RNA name").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], FeatureRow::new("Cytokeratin", "KRT1/KRT10"));
    }

    #[test]
    fn nulls_become_empty_strings() {
        let df = df! {
            "Protein name" => &[Some("P1"), Some("P2")],
            "RNA name" => &[Some("R1"), None],
        }
        .unwrap();
        let rows = feature_rows_from_frame(&df, "Protein name", "RNA name").unwrap();
        assert_eq!(rows[1].rna, "");
    }

    #[test]
    fn numeric_columns_are_stringified() {
        let df = df! {
            "protein" => &["P1"],
            "rna" => &[7i64],
        }
        .unwrap();
        let rows = feature_rows_from_frame(&df, "protein", "rna").unwrap();
        assert_eq!(rows[0].rna, "7");
    }

    #[test]
    fn missing_column_lists_available() {
        let df = df! { "protein" => &["P1"] }.unwrap();
        let err = feature_rows_from_frame(&df, "protein", "RNA name").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'RNA name'"), "{message}");
        assert!(message.contains("protein"), "{message}");
    }
}
