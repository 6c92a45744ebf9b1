//! Leakless: command-line entry point
//!
//! Loads the training, evaluation and optional ground-truth tables, runs the
//! pipeline and writes the prediction table.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use polars::prelude::DataFrame;

use leakless::cli::{confirm_overwrite, Cli};
use leakless::pipeline::{
    load_dataset, run_pipeline, save_dataset, LogisticRegression, PipelineConfig,
};
use leakless::report::{render_statistics, write_statistics, ExportParams, RunSummary};
use leakless::utils::{
    create_spinner, finish_with_success, hidden_spinner, print_banner, print_completion,
    print_config, ConfigCard, ConsoleReporter, SilentReporter,
    StageReporter,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let base_config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    let config = cli.apply_overrides(base_config);
    config.validate()?;

    let output_path = cli.output_path();

    if !cli.quiet {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(&ConfigCard {
            train: &cli.train,
            test: &cli.test,
            output: &output_path,
            label: &config.label_column,
            id: &config.id_column,
            seed: config.model.seed,
            max_iter: config.model.max_iter,
        });
    }

    // Ask before any work so a declined prompt leaves nothing behind
    if !cli.no_confirm {
        for path in std::iter::once(&output_path).chain(cli.stats_output.as_ref()) {
            if !confirm_overwrite(path)? {
                println!("Cancelled by user.");
                return Ok(());
            }
        }
    }

    let reporter: &dyn StageReporter = if cli.quiet {
        &SilentReporter
    } else {
        &ConsoleReporter
    };

    // Step 1: Load tables
    let step_start = Instant::now();
    reporter.step(1, "Loading data");
    let train = load_with_spinner(&cli.train, "training", cli.infer_schema_length, cli.quiet)?;
    let eval = load_with_spinner(&cli.test, "evaluation", cli.infer_schema_length, cli.quiet)?;
    let truth = cli
        .truth
        .as_deref()
        .map(|path| load_with_spinner(path, "ground-truth", cli.infer_schema_length, cli.quiet))
        .transpose()?;
    let load_time = step_start.elapsed();

    // Steps 2-7: prepare features, train, evaluate
    let step_start = Instant::now();
    let classifier = LogisticRegression::from_config(&config.model);
    let mut run = run_pipeline(
        &train,
        &eval,
        truth.as_ref(),
        &config,
        &classifier,
        reporter,
    )?;
    let pipeline_time = step_start.elapsed();

    // Render everything before the first write so a serialisation error leaves no files
    let stats_json = match &cli.stats_output {
        Some(_) => {
            let truth_file = cli.truth.as_ref().map(|p| p.display().to_string());
            let params = ExportParams {
                train_file: &cli.train.display().to_string(),
                test_file: &cli.test.display().to_string(),
                truth_file: truth_file.as_deref(),
                label_column: &config.label_column,
                id_column: &config.id_column,
                seed: config.model.seed,
            };
            Some(render_statistics(&run, &params)?)
        }
        None => None,
    };

    // Step 8: Save outputs
    let step_start = Instant::now();
    reporter.step(8, "Saving results");
    save_dataset(&mut run.predictions, &output_path)?;

    if let (Some(stats_path), Some(json)) = (&cli.stats_output, &stats_json) {
        if let Err(err) = write_statistics(json, stats_path) {
            // A failed run leaves no predictions behind
            let _ = std::fs::remove_file(&output_path);
            return Err(err);
        }
    }

    reporter.success(&format!(
        "Wrote {} predictions to {}",
        run.predictions.height(),
        output_path.display()
    ));
    if let Some(stats_path) = &cli.stats_output {
        reporter.success(&format!("Statistics exported to {}", stats_path.display()));
    }
    let save_time = step_start.elapsed();

    if !cli.quiet {
        let raw_columns = train.width().saturating_sub(2);
        let mut summary = RunSummary::from_run(&run, raw_columns);
        summary.set_load_time(load_time);
        summary.set_pipeline_time(pipeline_time);
        summary.set_save_time(save_time);
        summary.display();
        print_completion();
    }

    Ok(())
}

fn load_with_spinner(
    path: &Path,
    role: &str,
    infer_schema_length: usize,
    quiet: bool,
) -> Result<DataFrame> {
    let spinner: ProgressBar = if quiet {
        hidden_spinner()
    } else {
        create_spinner(&format!("Loading {} table...", role))
    };
    let df = load_dataset(path, infer_schema_length)?;
    finish_with_success(
        &spinner,
        &format!("Loaded {} table: {} rows × {} columns", role, df.height(), df.width()),
    );
    Ok(df)
}
