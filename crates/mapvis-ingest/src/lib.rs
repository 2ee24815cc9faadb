//! Input loading for mapvis: label mappings from CSV/TSV files, feature
//! tables through polars, and color override files.

#![deny(unsafe_code)]

pub mod error;
pub mod frame;
pub mod mapping;
pub mod overrides;

pub use error::{IngestError, Result};
pub use frame::{feature_rows_from_frame, read_feature_frame};
pub use mapping::{
    DEFAULT_SOURCE_COLUMN, DEFAULT_TARGET_COLUMN, delimiter_for_path, load_label_mapping,
    load_label_mapping_with_delimiter,
};
pub use overrides::{load_color_overrides, parse_color_overrides};
