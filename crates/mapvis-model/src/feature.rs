//! Protein/RNA feature mapping types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How many atomic identifiers sit on each side of a feature group.
///
/// The first word is the protein side, the second the RNA side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    OneToOne,
    /// One protein complex made of several gene products.
    OneToMany,
    /// Alternative splicing: several proteins from one gene.
    ManyToOne,
    ManyToMany,
}

impl Cardinality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::OneToOne => "one_to_one",
            Cardinality::OneToMany => "one_to_many",
            Cardinality::ManyToOne => "many_to_one",
            Cardinality::ManyToMany => "many_to_many",
        }
    }

    /// Short ratio form used in tables and logs.
    pub fn ratio(&self) -> &'static str {
        match self {
            Cardinality::OneToOne => "1:1",
            Cardinality::OneToMany => "1:n",
            Cardinality::ManyToOne => "n:1",
            Cardinality::ManyToMany => "n:m",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregation applied to the measurements on one side of a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    #[default]
    None,
    Sum,
    Max,
}

impl Operator {
    pub fn is_none(&self) -> bool {
        matches!(self, Operator::None)
    }

    /// Display form used in the operation columns (`""`, `sum()`, `max()`).
    pub fn label(&self) -> &'static str {
        match self {
            Operator::None => "",
            Operator::Sum => "sum()",
            Operator::Max => "max()",
        }
    }
}

/// One raw row of a feature table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub protein: String,
    pub rna: String,
}

impl FeatureRow {
    pub fn new(protein: impl Into<String>, rna: impl Into<String>) -> Self {
        Self {
            protein: protein.into(),
            rna: rna.into(),
        }
    }
}

/// Result of classifying one pair of identifier lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub cardinality: Cardinality,
    pub consensus: String,
    pub protein_operator: Operator,
    pub rna_operator: Operator,
}

/// Rows sharing one consensus label, merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureGroup {
    pub consensus: String,
    pub cardinality: Cardinality,
    pub protein_operator: Operator,
    pub rna_operator: Operator,
    /// Deduplicated, in first-appearance order.
    pub proteins: Vec<String>,
    /// Deduplicated, in first-appearance order.
    pub rnas: Vec<String>,
    /// Zero-based indices of the input rows merged into this group.
    pub source_rows: Vec<usize>,
}
