use std::path::PathBuf;

use mapvis_model::MapvisError;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read table {table}: {source}")]
    Polars {
        table: String,
        #[source]
        source: polars::error::PolarsError,
    },

    #[error("column '{column}' not found in {table} (available: {available})")]
    MissingColumn {
        table: String,
        column: String,
        available: String,
    },

    #[error("failed to parse TOML {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid color overrides in {path}: {message}")]
    InvalidOverrides { path: PathBuf, message: String },

    #[error("invalid mapping in {path}: {source}")]
    Mapping {
        path: PathBuf,
        #[source]
        source: MapvisError,
    },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn polars(table: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::Polars {
            table: table.into(),
            source,
        }
    }

    pub(crate) fn missing_column<'a, I>(table: impl Into<String>, column: &str, available: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::MissingColumn {
            table: table.into(),
            column: column.to_string(),
            available: available.into_iter().collect::<Vec<_>>().join(", "),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
