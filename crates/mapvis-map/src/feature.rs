//! Grouping of protein/RNA feature rows by consensus label.

use std::collections::BTreeMap;

use tracing::{debug, info, info_span, trace};

use mapvis_model::{
    Cardinality, FeatureGroup, FeatureRow, MapvisError, ReconcileOptions, Result, TableModel,
};

use crate::classify::{classify, dedup_preserving_order, split_identifiers};
use crate::color::{ColorAssigner, ColorMap, parse_overrides};
use crate::layout::feature_table;

/// Output of [`reconcile_features`].
#[derive(Debug, Clone)]
pub struct FeatureTable {
    /// Sorted by consensus label.
    pub groups: Vec<FeatureGroup>,
    pub colors: ColorMap,
    pub table: TableModel,
}

impl FeatureTable {
    pub fn group(&self, consensus: &str) -> Option<&FeatureGroup> {
        self.groups.iter().find(|group| group.consensus == consensus)
    }

    /// Number of groups per cardinality class.
    pub fn count_by_cardinality(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for group in &self.groups {
            *counts.entry(group.cardinality.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// A row after splitting, before grouping.
#[derive(Debug, Clone)]
struct SplitRow {
    index: usize,
    proteins: Vec<String>,
    rnas: Vec<String>,
}

#[derive(Debug, Default)]
struct GroupAccumulator {
    proteins: Vec<String>,
    rnas: Vec<String>,
    rows: Vec<usize>,
}

/// Splits every row up front so that a malformed row fails the whole call
/// before any grouping happens.
fn split_rows(rows: &[FeatureRow], delimiter: &str) -> Result<Vec<SplitRow>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| -> Result<SplitRow> {
            let context = format!("row {} ({:?} / {:?})", index + 1, row.protein, row.rna);
            let proteins =
                split_identifiers(&row.protein, delimiter, &format!("{context}, protein"))?;
            let rnas = split_identifiers(&row.rna, delimiter, &format!("{context}, RNA"))?;
            Ok(SplitRow {
                index,
                proteins: dedup_preserving_order(proteins),
                rnas: dedup_preserving_order(rnas),
            })
        })
        .collect()
}

/// Orders groups lexicographically by consensus label.
pub fn sort_feature_groups(groups: &mut [FeatureGroup]) {
    groups.sort_by(|a, b| a.consensus.cmp(&b.consensus));
}

/// Groups rows by their provisional consensus label and re-classifies each
/// merged group.
///
/// A group keeps the label it was grouped under; re-classification only
/// updates its cardinality and operators.
pub fn group_features(rows: &[FeatureRow], delimiter: &str) -> Result<Vec<FeatureGroup>> {
    let split = split_rows(rows, delimiter)?;

    let mut accumulators: BTreeMap<String, GroupAccumulator> = BTreeMap::new();
    for row in split {
        let provisional = classify(&row.proteins, &row.rnas)?;
        trace!(
            row = row.index + 1,
            consensus = %provisional.consensus,
            cardinality = %provisional.cardinality,
            "classified feature row"
        );
        let acc = accumulators.entry(provisional.consensus).or_default();
        acc.proteins.extend(row.proteins);
        acc.rnas.extend(row.rnas);
        acc.rows.push(row.index);
    }

    let mut groups = accumulators
        .into_iter()
        .map(|(consensus, acc)| -> Result<FeatureGroup> {
            let proteins = dedup_preserving_order(acc.proteins);
            let rnas = dedup_preserving_order(acc.rnas);
            let merged = classify(&proteins, &rnas)?;
            if acc.rows.len() > 1 {
                debug!(
                    consensus = %consensus,
                    rows = acc.rows.len(),
                    cardinality = %merged.cardinality,
                    "merged feature rows"
                );
            }
            Ok(FeatureGroup {
                consensus,
                cardinality: merged.cardinality,
                protein_operator: merged.protein_operator,
                rna_operator: merged.rna_operator,
                proteins,
                rnas,
                source_rows: acc.rows,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    sort_feature_groups(&mut groups);
    Ok(groups)
}

/// Reconciles a feature table into sorted, colored groups.
///
/// # Errors
///
/// Fails before any grouping when the table exceeds
/// [`ReconcileOptions::max_labels`] rows, a color override is malformed, or a
/// row has an empty identifier.
pub fn reconcile_features(rows: &[FeatureRow], options: &ReconcileOptions) -> Result<FeatureTable> {
    let span = info_span!("reconcile_features", rows = rows.len());
    let _guard = span.enter();

    if rows.len() > options.max_labels {
        return Err(MapvisError::InputTooLarge {
            what: "feature table".to_string(),
            count: rows.len(),
            limit: options.max_labels,
        });
    }
    let overrides = parse_overrides(&options.color_overrides)?;

    let groups = group_features(rows, &options.delimiter)?;
    let colors = ColorAssigner::new()
        .assign_parsed(groups.iter().map(|g| g.consensus.as_str()), &overrides);
    let table = feature_table(&groups, &colors, options);

    let merged = groups
        .iter()
        .filter(|g| g.cardinality != Cardinality::OneToOne)
        .count();
    info!(
        groups = groups.len(),
        with_operators = merged,
        "reconciled feature mappings"
    );
    Ok(FeatureTable {
        groups,
        colors,
        table,
    })
}
