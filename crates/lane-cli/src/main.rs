//! Lane normalizer CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use lane_cli::logging::{LogConfig, LogFormat, init_logging, redact_value};
use lane_cli::summary::print_summary;
use lane_core::PipelineError;
use lane_ingest::IngestError;
use lane_map::ClassifyError;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_countries, run_files, run_normalize, run_sheets};

/// Exit code for runs aborted because the language model was unreachable.
const EXIT_ORACLE_UNAVAILABLE: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Run(args) => run_normalize(args).map(|report| print_summary(&report)),
        Command::Sheets { file } => run_sheets(file),
        Command::Files { dir } => run_files(dir.as_deref()),
        Command::Countries => run_countries(),
    };
    let exit_code = match outcome {
        Ok(()) => 0,
        Err(error) => exit_code_for(&error),
    };
    std::process::exit(exit_code);
}

/// Reports `error` and picks the exit code.
///
/// A sheet without a lane id column or a workbook without sheets ends the
/// run cleanly.
fn exit_code_for(error: &anyhow::Error) -> i32 {
    if let Some(ClassifyError::NoLaneIdColumnFound { .. }) =
        error.chain().find_map(|e| e.downcast_ref::<ClassifyError>())
    {
        println!("No \"Lane ID\" column could be identified: {error:#}");
        return 0;
    }
    if let Some(IngestError::NoSheets { path }) =
        error.chain().find_map(|e| e.downcast_ref::<IngestError>())
    {
        println!("{} contains no sheets.", path.display());
        return 0;
    }
    if let Some(PipelineError::Oracle {
        lane_id,
        column,
        value,
        source,
    }) = error.chain().find_map(|e| e.downcast_ref::<PipelineError>())
    {
        eprintln!("error: {}", source.user_message());
        eprintln!(
            "       while resolving lane {lane_id}, column {column}, value {}",
            redact_value(value)
        );
        eprintln!("       {error:#}");
        return EXIT_ORACLE_UNAVAILABLE;
    }
    eprintln!("error: {error:#}");
    1
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
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
