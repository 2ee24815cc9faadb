//! Table layout: turns reconciled groups into a styled [`TableModel`].

use mapvis_model::{
    Bucket, CellStyle, ColorEntry, ColorSource, Column, ColumnRole, ConsensusGroup, FeatureGroup,
    FontStyle, HexColor, Legend, LegendEntry, LegendSection, Operator, ReconcileOptions,
    TableCell, TableModel, TableRow, TextColor,
};

use crate::color::{ColorMap, contrast_text_color, lighten};

pub const CELLTYPE_CAPTION: &str = "Celltype Mapping Table";
pub const FEATURE_CAPTION: &str = "Feature Mapping Table";
pub const CONSENSUS_COLUMN: &str = "Consensus label";
pub const OPERATION_COLUMN: &str = "Operation";

/// Everything [`cell_style`] needs to style one cell.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub color: &'a ColorEntry,
    pub bucket: Option<Bucket>,
    pub role: ColumnRole,
    pub lighten_factor: f64,
}

/// Styles one cell. Rows present in a single source get a lightened
/// background; text color always contrasts with the final background.
pub fn cell_style(context: &RowContext<'_>) -> CellStyle {
    let background = match context.bucket {
        Some(bucket) if !bucket.is_shared() => lighten(context.color.color, context.lighten_factor),
        _ => context.color.color,
    };
    let font = match context.role {
        ColumnRole::Labels => FontStyle::Normal,
        ColumnRole::Consensus => FontStyle::Bold,
        ColumnRole::Operator => FontStyle::Italic,
    };
    CellStyle {
        background,
        text: contrast_text_color(background),
        font,
    }
}

fn caption(options: &ReconcileOptions, default: &str) -> String {
    options
        .caption
        .clone()
        .unwrap_or_else(|| default.to_string())
}

fn cell(values: Vec<String>, context: &RowContext<'_>) -> TableCell {
    TableCell {
        values,
        style: cell_style(context),
    }
}

fn color_or_white(colors: &ColorMap, label: &str) -> ColorEntry {
    colors.get(label).cloned().unwrap_or_else(|| ColorEntry {
        label: label.to_string(),
        color: HexColor::WHITE,
        text: TextColor::Black,
        source: ColorSource::Generated,
    })
}

fn operator_values(operator: Operator) -> Vec<String> {
    if operator.is_none() {
        Vec::new()
    } else {
        vec![operator.label().to_string()]
    }
}

/// Column headers of a celltype table.
pub fn celltype_columns(options: &ReconcileOptions) -> Vec<Column> {
    vec![
        Column::new(options.dataset_a.clone(), ColumnRole::Labels),
        Column::new(
            format!("{} consensus", options.dataset_a),
            ColumnRole::Consensus,
        ),
        Column::new(
            format!("{} consensus", options.dataset_b),
            ColumnRole::Consensus,
        ),
        Column::new(options.dataset_b.clone(), ColumnRole::Labels),
    ]
}

/// Column headers of a feature table.
pub fn feature_columns(options: &ReconcileOptions) -> Vec<Column> {
    vec![
        Column::new(options.protein_column.clone(), ColumnRole::Labels),
        Column::new(OPERATION_COLUMN, ColumnRole::Operator),
        Column::new(CONSENSUS_COLUMN, ColumnRole::Consensus),
        Column::new(OPERATION_COLUMN, ColumnRole::Operator),
        Column::new(options.rna_column.clone(), ColumnRole::Labels),
    ]
}

/// Lays out celltype groups, which must already be sorted.
///
/// A label missing from `colors` is painted white rather than dropped.
pub fn celltype_table(
    groups: &[ConsensusGroup],
    colors: &ColorMap,
    options: &ReconcileOptions,
) -> TableModel {
    let columns = celltype_columns(options);
    let mut rows = Vec::with_capacity(groups.len());
    for group in groups {
        let color = &color_or_white(colors, &group.consensus);
        let context = |role| RowContext {
            color,
            bucket: Some(group.bucket),
            role,
            lighten_factor: options.lighten_factor,
        };
        let consensus_if = |present: bool| {
            if present {
                vec![group.consensus.clone()]
            } else {
                Vec::new()
            }
        };
        rows.push(TableRow {
            consensus: group.consensus.clone(),
            bucket: Some(group.bucket),
            cells: vec![
                cell(group.labels_a.clone(), &context(ColumnRole::Labels)),
                cell(
                    consensus_if(group.bucket.in_a()),
                    &context(ColumnRole::Consensus),
                ),
                cell(
                    consensus_if(group.bucket.in_b()),
                    &context(ColumnRole::Consensus),
                ),
                cell(group.labels_b.clone(), &context(ColumnRole::Labels)),
            ],
        });
    }
    let legend = (options.show_legend && !rows.is_empty())
        .then(|| celltype_legend(groups, colors, options));
    TableModel {
        caption: caption(options, CELLTYPE_CAPTION),
        columns,
        rows,
        legend,
        hide_index: true,
    }
}

/// Legend with one section per bucket, in row order.
pub fn celltype_legend(
    groups: &[ConsensusGroup],
    colors: &ColorMap,
    options: &ReconcileOptions,
) -> Legend {
    let sections = Bucket::ALL
        .iter()
        .map(|bucket| {
            let title = match bucket {
                Bucket::BothPresent => format!("In {} and {}", options.dataset_a, options.dataset_b),
                Bucket::OnlyA => format!("Only in {}", options.dataset_a),
                Bucket::OnlyB => format!("Only in {}", options.dataset_b),
            };
            let mut entries: Vec<LegendEntry> = groups
                .iter()
                .filter(|group| group.bucket == *bucket)
                .filter_map(|group| {
                    colors.color(&group.consensus).map(|color| LegendEntry {
                        label: group.consensus.clone(),
                        color,
                    })
                })
                .collect();
            entries.sort_by(|a, b| a.label.cmp(&b.label));
            LegendSection { title, entries }
        })
        .collect();
    Legend { sections }
}

/// Lays out feature groups, which must already be sorted.
pub fn feature_table(
    groups: &[FeatureGroup],
    colors: &ColorMap,
    options: &ReconcileOptions,
) -> TableModel {
    let columns = feature_columns(options);
    let mut rows = Vec::with_capacity(groups.len());
    for group in groups {
        let color = &color_or_white(colors, &group.consensus);
        let context = |role| RowContext {
            color,
            bucket: None,
            role,
            lighten_factor: options.lighten_factor,
        };
        rows.push(TableRow {
            consensus: group.consensus.clone(),
            bucket: None,
            cells: vec![
                cell(group.proteins.clone(), &context(ColumnRole::Labels)),
                cell(
                    operator_values(group.protein_operator),
                    &context(ColumnRole::Operator),
                ),
                cell(
                    vec![group.consensus.clone()],
                    &context(ColumnRole::Consensus),
                ),
                cell(
                    operator_values(group.rna_operator),
                    &context(ColumnRole::Operator),
                ),
                cell(group.rnas.clone(), &context(ColumnRole::Labels)),
            ],
        });
    }
    let legend = (options.show_legend && !rows.is_empty()).then(|| Legend {
        sections: vec![LegendSection {
            title: CONSENSUS_COLUMN.to_string(),
            entries: colors
                .iter()
                .map(|entry| LegendEntry {
                    label: entry.label.clone(),
                    color: entry.color,
                })
                .collect(),
        }],
    });
    TableModel {
        caption: caption(options, FEATURE_CAPTION),
        columns,
        rows,
        legend,
        hide_index: true,
    }
}
