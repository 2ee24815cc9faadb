use thiserror::Error;

/// Errors raised while validating reconciliation inputs.
///
/// Every variant is detected before any grouping or layout work starts, so a
/// caller never receives a partially built table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapvisError {
    #[error("invalid mapping '{mapping}': {message}")]
    InvalidMapping { mapping: String, message: String },

    #[error("ambiguous feature group at {context}: {message}")]
    AmbiguousGroup { context: String, message: String },

    #[error("invalid color for '{label}': {value:?} is not a 6-digit hex color")]
    ColorFormat { label: String, value: String },

    #[error("{what} has {count} entries, above the limit of {limit}")]
    InputTooLarge {
        what: String,
        count: usize,
        limit: usize,
    },
}

impl MapvisError {
    pub(crate) fn invalid_mapping(mapping: &str, message: impl Into<String>) -> Self {
        Self::InvalidMapping {
            mapping: mapping.to_string(),
            message: message.into(),
        }
    }

    pub fn ambiguous(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AmbiguousGroup {
            context: context.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MapvisError>;
