//! Color override files.
//!
//! TOML files hold either a `[colors]` table or a flat table of
//! `label = "#rrggbb"` pairs; JSON files hold a flat object. Colors are
//! validated later, when they are applied to a label set.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{IngestError, Result};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OverrideFile {
    Sectioned { colors: BTreeMap<String, String> },
    Flat(BTreeMap<String, String>),
}

impl OverrideFile {
    fn into_colors(self) -> BTreeMap<String, String> {
        match self {
            Self::Sectioned { colors } | Self::Flat(colors) => colors,
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Parses override text; `json` selects JSON, otherwise TOML.
pub fn parse_color_overrides(
    text: &str,
    json: bool,
    path: &Path,
) -> Result<BTreeMap<String, String>> {
    let file: OverrideFile = if json {
        serde_json::from_str(text).map_err(|source| IngestError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        toml::from_str(text).map_err(|source| IngestError::Toml {
            path: path.to_path_buf(),
            source,
        })?
    };
    let colors = file.into_colors();
    if let Some(label) = colors.keys().find(|label| label.trim().is_empty()) {
        return Err(IngestError::InvalidOverrides {
            path: path.to_path_buf(),
            message: format!("empty label {label:?}"),
        });
    }
    Ok(colors)
}

/// Loads label colors from a `.toml` or `.json` file.
pub fn load_color_overrides(path: &Path) -> Result<BTreeMap<String, String>> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let colors = parse_color_overrides(&text, is_json(path), path)?;
    debug!(path = %path.display(), overrides = colors.len(), "loaded color overrides");
    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, json: bool) -> Result<BTreeMap<String, String>> {
        parse_color_overrides(text, json, Path::new("colors"))
    }

    #[test]
    fn toml_sectioned_and_flat() {
        let sectioned = parse("[colors]\n\"T-cell\" = \"#FF0000\"\n", false).unwrap();
        assert_eq!(sectioned.get("T-cell").map(String::as_str), Some("#FF0000"));

        let flat = parse("\"B-cell\" = \"00ff00\"\nNK = \"#0000ff\"\n", false).unwrap();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat.get("NK").map(String::as_str), Some("#0000ff"));
    }

    #[test]
    fn json_object() {
        let colors = parse(r##"{"T-cell": "#ff0000"}"##, true).unwrap();
        assert_eq!(colors.len(), 1);
    }

    #[test]
    fn non_string_values_are_rejected() {
        assert!(matches!(
            parse("T = 5\n", false),
            Err(IngestError::Toml { .. })
        ));
        assert!(matches!(
            parse(r##"["#ff0000"]"##, true),
            Err(IngestError::Json { .. })
        ));
    }

    #[test]
    fn blank_label_is_rejected() {
        let err = parse(r##"{" ": "#ff0000"}"##, true).unwrap_err();
        assert!(matches!(err, IngestError::InvalidOverrides { .. }));
    }
}
