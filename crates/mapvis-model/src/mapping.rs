//! Label mappings from source-specific labels to consensus labels.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::{MapvisError, Result};

/// A validated mapping from original labels to consensus labels.
///
/// Keys are unique and stored sorted, so iteration never depends on the
/// order the caller supplied the pairs in. Several keys may share one
/// consensus label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelMapping(BTreeMap<String, String>);

impl LabelMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mapping from `(original, consensus)` pairs.
    ///
    /// `name` identifies the mapping in error messages. Keys and values are
    /// trimmed. A repeated key is accepted only when it maps to the same
    /// consensus label again.
    ///
    /// # Errors
    ///
    /// Returns [`MapvisError::InvalidMapping`] for an empty key or value, or for
    /// a key that maps to two different consensus labels.
    pub fn from_pairs<I, K, V>(name: &str, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut mapping = Self::new();
        for (key, value) in pairs {
            mapping.insert(name, key.as_ref(), value.as_ref())?;
        }
        Ok(mapping)
    }

    /// Inserts one pair, applying the same validation as [`Self::from_pairs`].
    pub fn insert(&mut self, name: &str, original: &str, consensus: &str) -> Result<()> {
        let original = original.trim();
        let consensus = consensus.trim();
        if original.is_empty() {
            return Err(MapvisError::invalid_mapping(
                name,
                format!("empty original label for consensus {consensus:?}"),
            ));
        }
        if consensus.is_empty() {
            return Err(MapvisError::invalid_mapping(
                name,
                format!("label {original:?} maps to an empty consensus label"),
            ));
        }
        match self.0.get(original) {
            Some(existing) if existing != consensus => Err(MapvisError::invalid_mapping(
                name,
                format!("label {original:?} maps to both {existing:?} and {consensus:?}"),
            )),
            Some(_) => Ok(()),
            None => {
                self.0.insert(original.to_string(), consensus.to_string());
                Ok(())
            }
        }
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.0.get(original).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Distinct consensus labels, sorted.
    pub fn consensus_labels(&self) -> BTreeSet<&str> {
        self.0.values().map(String::as_str).collect()
    }

    /// Inverts the mapping: consensus label to its sorted original labels.
    pub fn invert(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut inverted: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        // Keys iterate in sorted order, so each bucket is already sorted.
        for (original, consensus) in &self.0 {
            inverted
                .entry(consensus.as_str())
                .or_default()
                .push(original.as_str());
        }
        inverted
    }
}
