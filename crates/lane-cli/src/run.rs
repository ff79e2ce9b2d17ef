//! One normalization run: ingest, classify, resolve, write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span};

use lane_core::{ColumnStats, ResolutionContext, ResolutionPipeline};
use lane_ingest::{HeaderLocation, load_sheet_table};
use lane_map::ColumnClassifier;
use lane_model::ColumnClassification;
use lane_oracle::{ChatCompletion, OracleAdapter};
use lane_report::{OutputFormat, write_report};
use lane_standards::{
    Settings, load_default_country_headers, load_default_lane_id_headers,
    load_default_oracle_prompt, load_default_vocabulary, load_oracle_prompt,
};

use crate::logging::log_data_enabled;

/// Inputs of a run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub input: PathBuf,
    /// First sheet when `None`.
    pub sheet: Option<String>,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub settings: Settings,
    pub show_progress: bool,
}

/// What a successful run did.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub input: PathBuf,
    pub sheet_name: String,
    pub header: HeaderLocation,
    pub lane_id_column: ColumnClassification,
    pub country_columns: Vec<ColumnClassification>,
    pub rows: usize,
    pub stats: Vec<(String, ColumnStats)>,
    pub fingerprint: String,
    pub output: PathBuf,
}

/// Runs the whole pipeline on one sheet.
///
/// `transport` answers oracle prompts; without one, unmatched values stay
/// unresolved.
pub fn execute(request: &RunRequest, transport: Option<&dyn ChatCompletion>) -> Result<RunReport> {
    let span = info_span!(
        "run",
        file = %request.input.display(),
        sheet = request.sheet.as_deref().unwrap_or("<first>")
    );
    let _guard = span.enter();

    let vocabulary = load_default_vocabulary().context("load reference vocabulary")?;
    let fingerprint = vocabulary.fingerprint().to_string();
    info!(countries = vocabulary.len(), fingerprint = %fingerprint, "reference vocabulary loaded");
    let country_headers = load_default_country_headers().context("load country headers")?;
    let lane_id_headers = load_default_lane_id_headers().context("load lane id headers")?;
    let prompt = load_prompt(request.settings.oracle.prompt_path.as_deref())?;
    let classifier = ColumnClassifier::new(
        &country_headers,
        &lane_id_headers,
        request.settings.classifier_options(),
    );

    let sheet = load_sheet_table(&request.input, request.sheet.as_deref())
        .with_context(|| format!("read {}", request.input.display()))?;
    info!(
        sheet = %sheet.sheet_name,
        header_row = sheet.header.row,
        strategy = %sheet.header.strategy,
        rows = sheet.table.row_count(),
        "header row located"
    );

    let (country_columns, lane_id_column) = {
        let span = info_span!("classify");
        let _guard = span.enter();
        let country = classifier
            .classify_country_columns(&sheet.table.headers)
            .context("classify country columns")?;
        let lane_id = classifier
            .classify_lane_id_column(&sheet.table.headers)
            .context("classify lane id column")?;
        (country, lane_id)
    };

    let context = ResolutionContext::new(vocabulary);
    let adapter = transport.map(|transport| {
        OracleAdapter::new(
            transport,
            prompt,
            context.vocabulary().cca2_codes().map(str::to_string),
        )
    });
    let mut pipeline = ResolutionPipeline::new(&context, request.settings.resolution_options())
        .with_value_logging(log_data_enabled());
    if let Some(adapter) = &adapter {
        pipeline = pipeline.with_oracle(adapter);
    }

    let progress = progress_bar(
        sheet.table.row_count() * country_columns.len(),
        request.show_progress,
    );
    let results = pipeline.resolve_columns(
        &sheet.table,
        &country_columns,
        &lane_id_column,
        |step| progress.set_position(step.done as u64),
    );
    progress.finish_and_clear();
    let results = results.context("resolve country values")?;

    let output = write_report(&results, &request.output_dir, request.format)
        .context("write results")?;
    Ok(RunReport {
        input: request.input.clone(),
        sheet_name: sheet.sheet_name,
        header: sheet.header,
        lane_id_column,
        country_columns,
        rows: sheet.table.row_count(),
        stats: pipeline.stats().to_vec(),
        fingerprint,
        output,
    })
}

fn load_prompt(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => load_oracle_prompt(path)
            .with_context(|| format!("load oracle prompt {}", path.display())),
        None => load_default_oracle_prompt().context("load oracle prompt"),
    }
}

fn progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible || total == 0 {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cells {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}
