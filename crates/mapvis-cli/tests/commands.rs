use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use mapvis_cli::cli::{Cli, Command, OutputFormatArg};
use mapvis_cli::commands::{run_celltypes, run_features, run_palette};

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("mapvis").chain(args.iter().copied()))
        .expect("parse arguments")
}

#[test]
fn parses_celltype_defaults() {
    let cli = parse(&["celltypes", "a.csv", "b.tsv"]);
    let Command::Celltypes(args) = cli.command else {
        panic!("expected celltypes");
    };
    assert_eq!(args.name_a, "Dataset 1");
    assert_eq!(args.name_b, "Dataset 2");
    assert_eq!(args.source_column, "source");
    assert_eq!(args.target_column, "target");
    assert_eq!(args.render.format, OutputFormatArg::Html);
    assert!(!args.render.no_legend);
    assert!(args.render.output.is_none());
}

#[test]
fn parses_feature_flags() {
    let cli = parse(&[
        "-v",
        "features",
        "features.csv",
        "--delimiter",
        ";",
        "--separator",
        "|",
        "--format",
        "json",
        "--no-legend",
    ]);
    let Command::Features(args) = cli.command else {
        panic!("expected features");
    };
    assert_eq!(args.delimiter, ";");
    assert_eq!(args.separator, Some('|'));
    assert_eq!(args.protein_column, "Protein name");
    assert_eq!(args.render.format, OutputFormatArg::Json);
    assert!(args.render.no_legend);
}

#[test]
fn parses_global_log_flags() {
    let cli = parse(&["palette", "--log-timestamps", "--log-target", "--no-log-spans"]);
    assert!(cli.log_timestamps);
    assert!(cli.log_target);
    assert!(cli.no_log_spans);

    let defaults = parse(&["palette"]);
    assert!(!defaults.log_timestamps);
    assert!(!defaults.log_target);
    assert!(!defaults.no_log_spans);
}

#[test]
fn celltypes_writes_json_output() {
    let dir = tempfile::tempdir().expect("temp dir");
    let a = write(dir.path(), "a.csv", "source,target\nTcell_1,T-cell\nBcell_A,B-cell\n");
    let b = write(dir.path(), "b.tsv", "source\ttarget\nT_cell_X\tT-cell\nNK_1\tNK cell\n");
    let colors = write(dir.path(), "colors.toml", "[colors]\n\"T-cell\" = \"#FF0000\"\n");
    let out = dir.path().join("out/table.json");

    let cli = parse(&[
        "celltypes",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "--name-a",
        "RNA",
        "--name-b",
        "ATAC",
        "--format",
        "json",
        "--colors",
        colors.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ]);
    let Command::Celltypes(args) = cli.command else {
        panic!("expected celltypes");
    };
    let output = run_celltypes(&args).expect("run celltypes");
    output.emit().expect("write output");

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("read output")).expect("json");
    assert_eq!(value["columns"][0]["name"], "RNA");
    assert_eq!(value["rows"][0]["consensus"], "T-cell");
    assert_eq!(value["rows"][0]["cells"][1]["style"]["background"], "#ff0000");
    assert_eq!(
        output.summary.counts,
        vec![
            ("In RNA and ATAC".to_string(), 1),
            ("Only in RNA".to_string(), 1),
            ("Only in ATAC".to_string(), 1),
        ]
    );
}

#[test]
fn features_renders_html_document() {
    let dir = tempfile::tempdir().expect("temp dir");
    let table = write(
        dir.path(),
        "features.csv",
        "Protein name,RNA name\nCD45RA,PTPRC\nCD45RO,PTPRC\nCytokeratin,KRT1/KRT10\n",
    );
    let cli = parse(&["features", table.to_str().unwrap()]);
    let Command::Features(args) = cli.command else {
        panic!("expected features");
    };
    let output = run_features(&args).expect("run features");
    assert!(output.rendered.starts_with("<!DOCTYPE html>"));
    assert!(output.rendered.contains("CD45RA<br/>CD45RO"));
    assert!(output.rendered.contains(">max()</td>"));
    assert!(output.rendered.contains(">sum()</td>"));
    assert_eq!(
        output.summary.counts,
        vec![("many_to_one".to_string(), 1), ("one_to_many".to_string(), 1)]
    );
}

#[test]
fn features_reports_malformed_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let table = write(dir.path(), "bad.csv", "Protein name,RNA name\nCD3,CD3E//CD3G\n");
    let cli = parse(&["features", table.to_str().unwrap()]);
    let Command::Features(args) = cli.command else {
        panic!("expected features");
    };
    let error = run_features(&args).unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("reconcile feature mappings"), "{message}");
    assert!(message.contains("row 1"), "{message}");
}

#[test]
fn missing_mapping_file_fails_with_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let b = write(dir.path(), "b.csv", "source,target\nx,X\n");
    let missing = dir.path().join("missing.csv");
    let cli = parse(&["celltypes", missing.to_str().unwrap(), b.to_str().unwrap()]);
    let Command::Celltypes(args) = cli.command else {
        panic!("expected celltypes");
    };
    let error = run_celltypes(&args).unwrap_err();
    assert!(format!("{error:#}").contains("missing.csv"));
}

#[test]
fn palette_lists_sixty_colors() {
    let text = run_palette();
    assert!(text.contains("#1f77b4"));
    assert!(text.contains("#d9d9d9"));
    assert!(text.contains("60"));
}
