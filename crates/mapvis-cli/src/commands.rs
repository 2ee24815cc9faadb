use std::collections::BTreeMap;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Color, Table};
use tracing::{info, info_span};

use mapvis_ingest::{
    delimiter_for_path, feature_rows_from_frame, load_color_overrides, load_label_mapping,
    read_feature_frame,
};
use mapvis_map::{contrast_text_color, default_palette, reconcile_celltypes, reconcile_features};
use mapvis_model::{Bucket, ReconcileOptions, TableModel};
use mapvis_report::{HtmlOptions, TerminalOptions, render_html_document, render_json, render_terminal};

use crate::cli::{CelltypeArgs, FeatureArgs, OutputFormatArg, RenderArgs};
use crate::summary::apply_table_style;

/// What one reconciliation produced, for the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub kind: &'static str,
    /// Consensus label or group counts, in display order.
    pub counts: Vec<(String, usize)>,
    pub output: Option<PathBuf>,
}

/// A rendered table plus its summary.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub rendered: String,
    pub summary: RunSummary,
}

impl RunOutput {
    /// Writes the rendered table to `--output`, or to stdout.
    pub fn emit(&self) -> Result<()> {
        match &self.summary.output {
            Some(path) => write_output(path, &self.rendered),
            None => {
                print!("{}", self.rendered);
                Ok(())
            }
        }
    }
}

fn write_output(path: &Path, rendered: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory: {}", parent.display()))?;
    }
    fs::write(path, rendered).with_context(|| format!("write output: {}", path.display()))
}

/// Options shared by both subcommands: caption, legend, limits and overrides.
pub fn reconcile_options(render: &RenderArgs) -> Result<ReconcileOptions> {
    let mut options = ReconcileOptions::default()
        .with_legend(!render.no_legend)
        .with_max_labels(render.max_labels);
    if let Some(caption) = &render.caption {
        options = options.with_caption(caption.clone());
    }
    if let Some(path) = &render.colors {
        let overrides = load_color_overrides(path)
            .with_context(|| format!("load color overrides: {}", path.display()))?;
        options = options.with_color_overrides(overrides);
    }
    Ok(options)
}

/// Renders `table` in the requested format.
pub fn render(table: &TableModel, render: &RenderArgs) -> Result<String> {
    match render.format {
        OutputFormatArg::Html => render_html_document(table, &HtmlOptions::default()),
        OutputFormatArg::Json => render_json(table),
        OutputFormatArg::Terminal => {
            let options = TerminalOptions {
                styled: render.output.is_none() && io::stdout().is_terminal(),
                width: None,
            };
            Ok(render_terminal(table, &options))
        }
    }
}

pub fn run_celltypes(args: &CelltypeArgs) -> Result<RunOutput> {
    let span = info_span!("celltypes", a = %args.mapping_a.display(), b = %args.mapping_b.display());
    let _guard = span.enter();

    let mapping_a = load_label_mapping(&args.mapping_a, &args.source_column, &args.target_column)
        .with_context(|| format!("load mapping: {}", args.mapping_a.display()))?;
    let mapping_b = load_label_mapping(&args.mapping_b, &args.source_column, &args.target_column)
        .with_context(|| format!("load mapping: {}", args.mapping_b.display()))?;

    let options =
        reconcile_options(&args.render)?.with_dataset_names(args.name_a.clone(), args.name_b.clone());
    let result = reconcile_celltypes(&mapping_a, &mapping_b, &options)
        .context("reconcile celltype mappings")?;

    let rendered = render(&result.table, &args.render)?;
    let counts = vec![
        (
            format!("In {} and {}", args.name_a, args.name_b),
            result.bucket_labels(Bucket::BothPresent).len(),
        ),
        (
            format!("Only in {}", args.name_a),
            result.bucket_labels(Bucket::OnlyA).len(),
        ),
        (
            format!("Only in {}", args.name_b),
            result.bucket_labels(Bucket::OnlyB).len(),
        ),
    ];
    info!(rows = result.table.rows.len(), "rendered celltype table");
    Ok(RunOutput {
        rendered,
        summary: RunSummary {
            kind: "celltypes",
            counts,
            output: args.render.output.clone(),
        },
    })
}

fn field_separator(args: &FeatureArgs) -> Result<u8> {
    match args.separator {
        None => Ok(delimiter_for_path(&args.table)),
        Some(ch) if ch.is_ascii() => Ok(ch as u8),
        Some(ch) => bail!("field separator must be a single ASCII character, got {ch:?}"),
    }
}

pub fn run_features(args: &FeatureArgs) -> Result<RunOutput> {
    let span = info_span!("features", table = %args.table.display());
    let _guard = span.enter();

    let separator = field_separator(args)?;
    let df = read_feature_frame(&args.table, separator)
        .with_context(|| format!("read feature table: {}", args.table.display()))?;
    let rows = feature_rows_from_frame(&df, &args.protein_column, &args.rna_column)
        .with_context(|| format!("extract feature rows: {}", args.table.display()))?;

    let options = reconcile_options(&args.render)?
        .with_delimiter(args.delimiter.clone())
        .with_feature_columns(args.protein_column.clone(), args.rna_column.clone());
    let result = reconcile_features(&rows, &options).context("reconcile feature mappings")?;

    let rendered = render(&result.table, &args.render)?;
    let by_cardinality: BTreeMap<&str, usize> = result.count_by_cardinality();
    let counts = by_cardinality
        .into_iter()
        .map(|(cardinality, count)| (cardinality.to_string(), count))
        .collect();
    info!(
        rows = rows.len(),
        groups = result.groups.len(),
        "rendered feature table"
    );
    Ok(RunOutput {
        rendered,
        summary: RunSummary {
            kind: "features",
            counts,
            output: args.render.output.clone(),
        },
    })
}

/// The default palette as a table of swatches.
pub fn run_palette() -> String {
    let mut table = Table::new();
    table.set_header(vec!["#", "Color", "Text"]);
    apply_table_style(&mut table);
    for (idx, color) in default_palette().iter().enumerate() {
        let [r, g, b] = color.rgb();
        let text = contrast_text_color(*color);
        let [tr, tg, tb] = text.as_color().rgb();
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(color.to_hex())
                .bg(Color::Rgb { r, g, b })
                .fg(Color::Rgb {
                    r: tr,
                    g: tg,
                    b: tb,
                }),
            Cell::new(text.as_str()),
        ]);
    }
    format!("{table}\n")
}
