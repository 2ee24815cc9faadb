//! Reconciliation of two celltype label mappings.

use std::collections::BTreeSet;

use tracing::{debug, info, info_span};

use mapvis_model::{
    Bucket, ConsensusGroup, LabelMapping, MapvisError, ReconcileOptions, Result, TableModel,
};

use crate::color::{ColorAssigner, ColorMap, parse_overrides};
use crate::layout::celltype_table;

/// Output of [`reconcile_celltypes`].
#[derive(Debug, Clone)]
pub struct CelltypeTable {
    /// Sorted: shared labels, then labels only in A, then only in B.
    pub groups: Vec<ConsensusGroup>,
    pub colors: ColorMap,
    pub table: TableModel,
}

impl CelltypeTable {
    /// Consensus labels of one bucket, sorted.
    pub fn bucket_labels(&self, bucket: Bucket) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|group| group.bucket == bucket)
            .map(|group| group.consensus.as_str())
            .collect()
    }
}

/// Orders groups by bucket, then lexicographically by consensus label.
pub fn sort_groups(groups: &mut [ConsensusGroup]) {
    groups.sort_by(|a, b| (a.bucket, &a.consensus).cmp(&(b.bucket, &b.consensus)));
}

/// Builds one sorted group per consensus label found in either mapping.
pub fn group_consensus(a: &LabelMapping, b: &LabelMapping) -> Vec<ConsensusGroup> {
    let inverted_a = a.invert();
    let inverted_b = b.invert();
    let labels: BTreeSet<&str> = inverted_a
        .keys()
        .chain(inverted_b.keys())
        .copied()
        .collect();

    let owned = |labels: Option<&Vec<&str>>| -> Vec<String> {
        labels
            .map(|labels| labels.iter().map(|l| (*l).to_string()).collect())
            .unwrap_or_default()
    };

    let mut groups: Vec<ConsensusGroup> = labels
        .into_iter()
        .filter_map(|label| {
            let labels_a = owned(inverted_a.get(label));
            let labels_b = owned(inverted_b.get(label));
            let bucket = Bucket::from_membership(!labels_a.is_empty(), !labels_b.is_empty())?;
            Some(ConsensusGroup {
                consensus: label.to_string(),
                labels_a,
                labels_b,
                bucket,
            })
        })
        .collect();
    sort_groups(&mut groups);
    groups
}

fn check_size(what: &str, count: usize, limit: usize) -> Result<()> {
    if count > limit {
        return Err(MapvisError::InputTooLarge {
            what: what.to_string(),
            count,
            limit,
        });
    }
    Ok(())
}

/// Reconciles two label mappings into a sorted, colored table.
///
/// # Errors
///
/// Fails before any grouping when a mapping exceeds
/// [`ReconcileOptions::max_labels`] or a color override is malformed.
pub fn reconcile_celltypes(
    a: &LabelMapping,
    b: &LabelMapping,
    options: &ReconcileOptions,
) -> Result<CelltypeTable> {
    let span = info_span!(
        "reconcile_celltypes",
        dataset_a = %options.dataset_a,
        dataset_b = %options.dataset_b
    );
    let _guard = span.enter();

    check_size(&options.dataset_a, a.len(), options.max_labels)?;
    check_size(&options.dataset_b, b.len(), options.max_labels)?;
    let overrides = parse_overrides(&options.color_overrides)?;

    let groups = group_consensus(a, b);
    let colors = ColorAssigner::new()
        .assign_parsed(groups.iter().map(|g| g.consensus.as_str()), &overrides);
    let table = celltype_table(&groups, &colors, options);

    let shared = groups.iter().filter(|g| g.bucket.is_shared()).count();
    debug!(
        labels_a = a.len(),
        labels_b = b.len(),
        "grouped original labels by consensus"
    );
    info!(
        consensus = groups.len(),
        shared,
        single_source = groups.len() - shared,
        "reconciled celltype mappings"
    );
    Ok(CelltypeTable {
        groups,
        colors,
        table,
    })
}
