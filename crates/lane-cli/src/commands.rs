use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use lane_ingest::{DEFAULT_INPUT_DIR, list_sheets, list_spreadsheet_files};
use lane_oracle::{ChatCompletion, MistralClient, MistralConfig};
use lane_report::OutputFormat;
use lane_standards::{Settings, load_default_vocabulary};

use lane_cli::run::{RunReport, RunRequest, execute};
use lane_cli::summary::print_countries;

use crate::cli::{OutputFormatArg, RunArgs};

pub fn run_normalize(args: &RunArgs) -> Result<RunReport> {
    let settings = resolve_settings(args)?;
    let transport = if settings.oracle.enabled {
        let config = MistralConfig::new(
            settings.oracle.endpoint.clone(),
            settings.oracle.model.clone(),
            settings.oracle.timeout(),
        )
        .with_api_key_from_env();
        info!(model = %config.model, "language model fallback enabled");
        Some(MistralClient::new(config).context("create language model client")?)
    } else {
        info!("language model fallback disabled");
        None
    };

    let request = RunRequest {
        input: args.file.clone(),
        sheet: args.sheet.clone(),
        output_dir: args.output_dir.clone(),
        format: match args.format {
            OutputFormatArg::Xlsx => OutputFormat::Xlsx,
            OutputFormatArg::Csv => OutputFormat::Csv,
        },
        settings,
        show_progress: !args.no_progress && io::stderr().is_terminal(),
    };
    execute(
        &request,
        transport.as_ref().map(|client| client as &dyn ChatCompletion),
    )
}

/// File settings, then `MISTRAL_MODEL`, then command-line flags.
fn resolve_settings(args: &RunArgs) -> Result<Settings> {
    let mut settings = Settings::load_or_default(args.config.as_deref()).context("load settings")?;
    settings.apply_env();
    if args.no_oracle {
        settings.oracle.enabled = false;
    }
    if let Some(pacing_ms) = args.pacing_ms {
        settings.oracle.pacing_ms = pacing_ms;
    }
    if let Some(threshold) = args.threshold {
        settings.resolution.fuzzy_threshold = threshold;
    }
    settings.validate().context("invalid settings")?;
    Ok(settings)
}

pub fn run_sheets(file: &Path) -> Result<()> {
    let sheets = list_sheets(file).with_context(|| format!("read {}", file.display()))?;
    if sheets.is_empty() {
        println!("{} contains no sheets.", file.display());
        return Ok(());
    }
    for (index, sheet) in sheets.iter().enumerate() {
        println!("{:>3}  {sheet}", index + 1);
    }
    Ok(())
}

pub fn run_files(dir: Option<&Path>) -> Result<()> {
    let dir = dir.unwrap_or_else(|| Path::new(DEFAULT_INPUT_DIR));
    let files = list_spreadsheet_files(dir)?;
    if files.is_empty() {
        println!("No spreadsheet files found in {}.", dir.display());
        return Ok(());
    }
    for file in files {
        println!("{}", file.display());
    }
    Ok(())
}

pub fn run_countries() -> Result<()> {
    let vocabulary = load_default_vocabulary().context("load reference vocabulary")?;
    print_countries(vocabulary.countries(), vocabulary.fingerprint());
    Ok(())
}
