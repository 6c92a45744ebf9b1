//! Accuracy, ground-truth alignment and the prediction table

use std::collections::HashMap;

use polars::prelude::*;

use super::error::{PipelineError, PipelineResult, TableRole};
use super::labels::{column_to_string_vec, labels_from_column};

/// Fraction of positions where `predicted` equals `actual`
///
/// Returns 0.0 for empty input.
pub fn accuracy(predicted: &[u8], actual: &[u8]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let correct = predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count();
    correct as f64 / actual.len() as f64
}

/// Look up the true label of every evaluation id, in evaluation order.
///
/// Ids are matched on their rendered value, so integer and float id columns
/// join. Repeated ids in `truth` are accepted only when they agree.
///
/// # Errors
/// - `MissingColumn` if `truth` lacks the id or label column
/// - `InvalidLabel` if the truth labels are not 0/1, or one id carries both labels
/// - `JoinMismatch` for the first evaluation id with no truth row
pub fn align_ground_truth(
    eval_ids: &Column,
    truth: &DataFrame,
    id_column: &str,
    label_column: &str,
) -> PipelineResult<Vec<u8>> {
    let missing = |column: &str| PipelineError::MissingColumn {
        column: column.to_string(),
        table: TableRole::GroundTruth,
    };
    let truth_ids = truth.column(id_column).map_err(|_| missing(id_column))?;
    let truth_labels = truth.column(label_column).map_err(|_| missing(label_column))?;

    let labels = labels_from_column(truth_labels)?;
    let mut lookup: HashMap<String, u8> = HashMap::with_capacity(labels.len());
    for (id, label) in column_to_string_vec(truth_ids)?.into_iter().zip(labels) {
        let Some(id) = id else { continue };
        match lookup.get(&id) {
            Some(&existing) if existing != label => {
                return Err(PipelineError::InvalidLabel {
                    column: label_column.to_string(),
                    reason: format!("ground-truth id '{}' has both labels 0 and 1", id),
                });
            }
            Some(_) => {}
            None => {
                lookup.insert(id, label);
            }
        }
    }

    column_to_string_vec(eval_ids)?
        .into_iter()
        .map(|id| {
            let id = id.unwrap_or_else(|| "null".to_string());
            lookup
                .get(&id)
                .copied()
                .ok_or_else(|| PipelineError::JoinMismatch {
                    id,
                    column: id_column.to_string(),
                })
        })
        .collect()
}

/// Build the two-column prediction table: evaluation ids then predicted labels
pub fn build_predictions(
    eval_ids: &Column,
    label_column: &str,
    predicted: &[u8],
) -> PipelineResult<DataFrame> {
    let labels: Vec<i32> = predicted.iter().map(|&p| i32::from(p)).collect();
    let df = DataFrame::new(vec![
        eval_ids.clone(),
        Column::new(label_column.into(), labels),
    ])?;
    Ok(df)
}
