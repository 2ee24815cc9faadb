//! Consensus mapping reconciliation and table layout.
//!
//! - [`reconcile_celltypes`] merges two label mappings into shared and
//!   single-source consensus groups.
//! - [`reconcile_features`] groups protein/RNA rows by consensus label and
//!   annotates each group with its cardinality and aggregation operators.
//!
//! Both produce a [`mapvis_model::TableModel`] colored by [`ColorAssigner`].

#![deny(unsafe_code)]

pub mod celltype;
pub mod classify;
pub mod color;
pub mod feature;
pub mod layout;
pub mod palette;

pub use celltype::{CelltypeTable, group_consensus, reconcile_celltypes, sort_groups};
pub use classify::{classify, dedup_preserving_order, split_identifiers};
pub use color::{
    ColorAssigner, ColorMap, brightness, contrast_text_color, format_with_opacity, lighten,
    parse_overrides,
};
pub use feature::{FeatureTable, group_features, reconcile_features, sort_feature_groups};
pub use layout::{RowContext, cell_style};
pub use palette::default_palette;
