//! CLI argument definitions for the lane normalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "lane-normalizer",
    version,
    about = "Normalize country references in lane spreadsheets to ISO 3166-1 alpha-2 codes",
    long_about = "Normalize free-text country references in lane spreadsheets.\n\n\
                  Finds the country and lane id columns, resolves every value against the\n\
                  reference vocabulary and falls back to a language model for the rest.\n\
                  Writes an annotated results_<timestamp>.xlsx (or .csv) file."
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

    /// Include cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve the country columns of one sheet and write the results.
    Run(RunArgs),

    /// List the sheets of a workbook.
    Sheets {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List spreadsheet files in a directory.
    Files {
        /// Directory to scan (default: worksheets).
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Print the reference country vocabulary.
    Countries,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Spreadsheet to process (.xlsx, .xlsm, .xls, .ods or .csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Sheet to read (default: the first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Directory for the results file (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Results file format.
    #[arg(long = "format", value_enum, default_value = "xlsx")]
    pub format: OutputFormatArg,

    /// Settings file (default: lane.toml in the working directory, if present).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Never call the language model; unmatched values stay unresolved.
    #[arg(long = "no-oracle")]
    pub no_oracle: bool,

    /// Pause after each language model call, in milliseconds.
    #[arg(long = "pacing-ms", value_name = "MS")]
    pub pacing_ms: Option<u64>,

    /// Minimum fuzzy score for a vocabulary match, between 0 and 1.
    #[arg(long = "threshold", value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Xlsx,
    Csv,
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
