//! CLI argument definitions for mapvis.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use mapvis_ingest::{DEFAULT_SOURCE_COLUMN, DEFAULT_TARGET_COLUMN};
use mapvis_model::options::{
    DEFAULT_DATASET_A, DEFAULT_DATASET_B, DEFAULT_DELIMITER, DEFAULT_MAX_LABELS,
    DEFAULT_PROTEIN_COLUMN, DEFAULT_RNA_COLUMN,
};

#[derive(Parser)]
#[command(
    name = "mapvis",
    version,
    about = "Reconcile label mappings into colored consensus tables",
    long_about = "Reconcile label mappings into colored consensus tables.\n\n\
                  `celltypes` merges two label -> consensus mappings into shared and\n\
                  single-source groups. `features` groups protein/RNA pairs by consensus\n\
                  label and annotates each group with its aggregation operators."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the module path in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,

    /// Do not log span close events (JSON format).
    #[arg(long = "no-log-spans", global = true)]
    pub no_log_spans: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile two celltype label mappings.
    Celltypes(CelltypeArgs),

    /// Group protein/RNA feature pairs by consensus label.
    Features(FeatureArgs),

    /// Show the default consensus color palette.
    Palette,
}

#[derive(Args, Clone)]
pub struct RenderArgs {
    /// Output format.
    #[arg(long = "format", value_enum, default_value = "html")]
    pub format: OutputFormatArg,

    /// Write the rendered table to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Color overrides (TOML or JSON) keyed by consensus label.
    #[arg(long = "colors", value_name = "PATH")]
    pub colors: Option<PathBuf>,

    /// Table caption.
    #[arg(long = "caption")]
    pub caption: Option<String>,

    /// Omit the legend.
    #[arg(long = "no-legend")]
    pub no_legend: bool,

    /// Reject inputs with more labels or rows than this.
    #[arg(long = "max-labels", value_name = "N", default_value_t = DEFAULT_MAX_LABELS)]
    pub max_labels: usize,
}

#[derive(Args, Clone)]
pub struct CelltypeArgs {
    /// Mapping file for the first dataset (CSV or TSV).
    #[arg(value_name = "MAPPING_A")]
    pub mapping_a: PathBuf,

    /// Mapping file for the second dataset (CSV or TSV).
    #[arg(value_name = "MAPPING_B")]
    pub mapping_b: PathBuf,

    /// Display name of the first dataset.
    #[arg(long = "name-a", default_value = DEFAULT_DATASET_A)]
    pub name_a: String,

    /// Display name of the second dataset.
    #[arg(long = "name-b", default_value = DEFAULT_DATASET_B)]
    pub name_b: String,

    /// Column holding the original labels.
    #[arg(long = "source-column", default_value = DEFAULT_SOURCE_COLUMN)]
    pub source_column: String,

    /// Column holding the consensus labels.
    #[arg(long = "target-column", default_value = DEFAULT_TARGET_COLUMN)]
    pub target_column: String,

    #[command(flatten)]
    pub render: RenderArgs,
}

#[derive(Args, Clone)]
pub struct FeatureArgs {
    /// Feature table (CSV or TSV) with protein and RNA columns.
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Column holding protein identifiers.
    #[arg(long = "protein-column", default_value = DEFAULT_PROTEIN_COLUMN)]
    pub protein_column: String,

    /// Column holding RNA identifiers.
    #[arg(long = "rna-column", default_value = DEFAULT_RNA_COLUMN)]
    pub rna_column: String,

    /// Separator between identifiers inside one field.
    #[arg(long = "delimiter", default_value = DEFAULT_DELIMITER)]
    pub delimiter: String,

    /// Field separator of the table file (default: tab for .tsv, comma otherwise).
    #[arg(long = "separator", value_name = "CHAR")]
    pub separator: Option<char>,

    #[command(flatten)]
    pub render: RenderArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Standalone HTML document.
    Html,
    /// Colored table for the terminal.
    Terminal,
    /// Table model as JSON.
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
