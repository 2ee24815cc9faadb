//! Configuration options for reconciliation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DATASET_A: &str = "Dataset 1";
pub const DEFAULT_DATASET_B: &str = "Dataset 2";
pub const DEFAULT_PROTEIN_COLUMN: &str = "Protein name";
pub const DEFAULT_RNA_COLUMN: &str = "RNA name";
pub const DEFAULT_DELIMITER: &str = "/";
pub const DEFAULT_MAX_LABELS: usize = 100_000;

/// Options shared by the celltype and feature reconcilers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileOptions {
    /// Display name of the first source.
    pub dataset_a: String,
    /// Display name of the second source.
    pub dataset_b: String,
    /// Table caption. `None` uses the reconciler's default caption.
    pub caption: Option<String>,
    /// Separator between atomic identifiers in a feature field.
    pub delimiter: String,
    /// Header of the protein column in feature tables.
    pub protein_column: String,
    /// Header of the RNA column in feature tables.
    pub rna_column: String,
    /// Consensus label to raw hex color. Validated when colors are assigned.
    pub color_overrides: BTreeMap<String, String>,
    /// Factor passed to `lighten` for rows present in only one source.
    pub lighten_factor: f64,
    /// Upper bound on labels per mapping and rows per feature table.
    pub max_labels: usize,
    /// Attach a legend to the table model.
    pub show_legend: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            dataset_a: DEFAULT_DATASET_A.to_string(),
            dataset_b: DEFAULT_DATASET_B.to_string(),
            caption: None,
            delimiter: DEFAULT_DELIMITER.to_string(),
            protein_column: DEFAULT_PROTEIN_COLUMN.to_string(),
            rna_column: DEFAULT_RNA_COLUMN.to_string(),
            color_overrides: BTreeMap::new(),
            lighten_factor: 0.5,
            max_labels: DEFAULT_MAX_LABELS,
            show_legend: true,
        }
    }
}

impl ReconcileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset_names(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.dataset_a = a.into();
        self.dataset_b = b.into();
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_feature_columns(
        mut self,
        protein: impl Into<String>,
        rna: impl Into<String>,
    ) -> Self {
        self.protein_column = protein.into();
        self.rna_column = rna.into();
        self
    }

    pub fn with_color_overrides(mut self, overrides: BTreeMap<String, String>) -> Self {
        self.color_overrides = overrides;
        self
    }

    pub fn with_color(mut self, label: impl Into<String>, color: impl Into<String>) -> Self {
        self.color_overrides.insert(label.into(), color.into());
        self
    }

    pub fn with_max_labels(mut self, max_labels: usize) -> Self {
        self.max_labels = max_labels;
        self
    }

    pub fn with_legend(mut self, enable: bool) -> Self {
        self.show_legend = enable;
        self
    }
}
