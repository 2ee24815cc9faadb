use serde::{Deserialize, Serialize};

/// Which source(s) contain at least one label mapping to a consensus label.
///
/// Variant order is the required row order of a celltype table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    BothPresent,
    OnlyA,
    OnlyB,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::BothPresent, Bucket::OnlyA, Bucket::OnlyB];

    pub fn from_membership(in_a: bool, in_b: bool) -> Option<Self> {
        match (in_a, in_b) {
            (true, true) => Some(Bucket::BothPresent),
            (true, false) => Some(Bucket::OnlyA),
            (false, true) => Some(Bucket::OnlyB),
            (false, false) => None,
        }
    }

    pub fn in_a(&self) -> bool {
        matches!(self, Bucket::BothPresent | Bucket::OnlyA)
    }

    pub fn in_b(&self) -> bool {
        matches!(self, Bucket::BothPresent | Bucket::OnlyB)
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, Bucket::BothPresent)
    }
}

/// A consensus label with the original labels that map to it from each source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusGroup {
    pub consensus: String,
    /// Sorted; empty only when `bucket` excludes source A.
    pub labels_a: Vec<String>,
    /// Sorted; empty only when `bucket` excludes source B.
    pub labels_b: Vec<String>,
    pub bucket: Bucket,
}
