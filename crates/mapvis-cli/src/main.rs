//! mapvis CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use mapvis_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use mapvis_cli::commands::{RunOutput, run_celltypes, run_features, run_palette};
use mapvis_cli::logging::{LogConfig, LogFormat, init_logging};
use mapvis_cli::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Celltypes(args) => run_celltypes(args).and_then(|output| finish(&output)),
        Command::Features(args) => run_features(args).and_then(|output| finish(&output)),
        Command::Palette => {
            print!("{}", run_palette());
            Ok(())
        }
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn finish(output: &RunOutput) -> anyhow::Result<()> {
    output.emit()?;
    if output.summary.output.is_some() {
        print_summary(&output.summary);
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config = config
        .with_log_file(cli.log_file.clone())
        .with_timestamps(cli.log_timestamps)
        .with_target(cli.log_target)
        .with_spans(!cli.no_log_spans);
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
