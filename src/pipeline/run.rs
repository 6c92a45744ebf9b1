//! Pipeline orchestration: the fixed stage order from raw tables to predictions

use polars::prelude::*;

use super::classifier::{BinaryClassifier, ConvergenceWarning, FittedClassifier};
use super::config::PipelineConfig;
use super::error::{PipelineError, PipelineResult, TableRole};
use super::evaluate::{accuracy, align_ground_truth, build_predictions};
use super::features::{prepare_features, FitStatistics};
use super::labels::extract_labels;
use crate::utils::StageReporter;

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineRun<M> {
    pub statistics: FitStatistics,
    pub model: M,
    /// Identifier and predicted label per evaluation row, in evaluation order
    pub predictions: DataFrame,
    pub train_accuracy: f64,
    /// Present only when ground-truth labels were supplied
    pub eval_accuracy: Option<f64>,
    pub iterations: usize,
    pub convergence_warning: Option<ConvergenceWarning>,
    /// (rows, feature columns) of the prepared training features
    pub train_shape: (usize, usize),
    /// (rows, feature columns) of the prepared evaluation features
    pub eval_shape: (usize, usize),
}

/// Run every stage in order:
/// labels/ids -> encoding -> text drop -> reconciliation -> imputation ->
/// scaling -> training -> evaluation -> predictions.
///
/// All statistics are fitted on `train`; `eval` and `truth` only ever receive
/// them. Nothing is written to disk here.
pub fn run_pipeline<C: BinaryClassifier>(
    train: &DataFrame,
    eval: &DataFrame,
    truth: Option<&DataFrame>,
    config: &PipelineConfig,
    classifier: &C,
    reporter: &dyn StageReporter,
) -> PipelineResult<PipelineRun<C::Model>> {
    config.validate()?;

    reporter.step(2, "Preparing data");
    if train.height() == 0 {
        return Err(PipelineError::EmptyTable {
            table: TableRole::Training,
        });
    }
    let labels = extract_labels(train, &config.label_column)?;
    let eval_ids = eval
        .column(&config.id_column)
        .map_err(|_| PipelineError::MissingColumn {
            column: config.id_column.clone(),
            table: TableRole::Evaluation,
        })?
        .clone();

    let truth_labels = truth
        .map(|t| align_ground_truth(&eval_ids, t, &config.id_column, &config.label_column))
        .transpose()?;

    let train_x = without_columns(train, &[&config.label_column, &config.id_column]);
    let eval_x = without_columns(eval, &[&config.label_column, &config.id_column]);
    let positives = labels.iter().filter(|&&y| y == 1).count();
    reporter.detail(&format!(
        "Label '{}': {} positive / {} rows",
        config.label_column,
        positives,
        labels.len()
    ));
    reporter.detail(&format!(
        "Raw features: train {} columns, evaluation {} columns",
        train_x.width(),
        eval_x.width()
    ));

    let prepared = prepare_features(&train_x, &eval_x, config, reporter)?;

    reporter.step(6, "Training logistic regression");
    let x_train = prepared.train.to_matrix()?;
    let outcome = classifier.fit(&x_train, &labels)?;
    if let Some(warning) = &outcome.convergence_warning {
        reporter.warning(&warning.to_string());
    } else {
        reporter.success(&format!(
            "Model trained successfully ({} iteration(s))",
            outcome.iterations
        ));
    }

    reporter.step(7, "Evaluating accuracy");
    let train_predictions = outcome.model.predict(&x_train);
    let train_accuracy = accuracy(&train_predictions, &labels);
    reporter.info(&format!("Training accuracy: {:.4}", train_accuracy));

    let x_eval = prepared.eval.to_matrix()?;
    let eval_predictions = outcome.model.predict(&x_eval);
    let eval_accuracy = truth_labels.map(|actual| accuracy(&eval_predictions, &actual));
    if let Some(acc) = eval_accuracy {
        reporter.info(&format!("Evaluation accuracy: {:.4}", acc));
    }

    let predictions = build_predictions(&eval_ids, &config.label_column, &eval_predictions)?;

    Ok(PipelineRun {
        train_shape: (prepared.train.height(), prepared.train.width()),
        eval_shape: (prepared.eval.height(), prepared.eval.width()),
        statistics: prepared.statistics,
        model: outcome.model,
        predictions,
        train_accuracy,
        eval_accuracy,
        iterations: outcome.iterations,
        convergence_warning: outcome.convergence_warning,
    })
}

fn without_columns(df: &DataFrame, names: &[&String]) -> DataFrame {
    let present: Vec<String> = names
        .iter()
        .filter(|name| df.column(name.as_str()).is_ok())
        .map(|name| name.to_string())
        .collect();
    df.drop_many(&present)
}
