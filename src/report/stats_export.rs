//! JSON export of the fitted statistics and run results

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{FitStatistics, PipelineRun};

/// Metadata about the run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    pub leakless_version: String,
    pub train_file: String,
    pub test_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truth_file: Option<String>,
    pub label_column: String,
    pub id_column: String,
    pub seed: u64,
}

/// Model results
#[derive(Serialize)]
pub struct ModelSummary<'a, M: Serialize> {
    pub parameters: &'a M,
    pub iterations: usize,
    pub converged: bool,
    pub train_accuracy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_accuracy: Option<f64>,
}

/// Complete statistics export
#[derive(Serialize)]
pub struct StatisticsExport<'a, M: Serialize> {
    pub metadata: RunMetadata,
    pub statistics: &'a FitStatistics,
    pub model: ModelSummary<'a, M>,
}

/// Parameters for the statistics export
pub struct ExportParams<'a> {
    pub train_file: &'a str,
    pub test_file: &'a str,
    pub truth_file: Option<&'a str>,
    pub label_column: &'a str,
    pub id_column: &'a str,
    pub seed: u64,
}

/// Build the export document for a run
pub fn build_statistics_export<'a, M: Serialize>(
    run: &'a PipelineRun<M>,
    params: &ExportParams,
) -> StatisticsExport<'a, M> {
    StatisticsExport {
        metadata: RunMetadata {
            timestamp: Utc::now().to_rfc3339(),
            leakless_version: env!("CARGO_PKG_VERSION").to_string(),
            train_file: params.train_file.to_string(),
            test_file: params.test_file.to_string(),
            truth_file: params.truth_file.map(|s| s.to_string()),
            label_column: params.label_column.to_string(),
            id_column: params.id_column.to_string(),
            seed: params.seed,
        },
        statistics: &run.statistics,
        model: ModelSummary {
            parameters: &run.model,
            iterations: run.iterations,
            converged: run.convergence_warning.is_none(),
            train_accuracy: run.train_accuracy,
            eval_accuracy: run.eval_accuracy,
        },
    }
}

/// Render the export document as pretty-printed JSON without touching disk
pub fn render_statistics<M: Serialize>(run: &PipelineRun<M>, params: &ExportParams) -> Result<String> {
    let export = build_statistics_export(run, params);
    serde_json::to_string_pretty(&export).context("Failed to serialize statistics to JSON")
}

/// Write previously rendered statistics to `output_path`
pub fn write_statistics(json: &str, output_path: &Path) -> Result<()> {
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write statistics to {}", output_path.display()))
}

/// Write the fitted statistics and model results to a JSON file
pub fn export_statistics<M: Serialize>(
    run: &PipelineRun<M>,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let json = render_statistics(run, params)?;
    write_statistics(&json, output_path)
}
