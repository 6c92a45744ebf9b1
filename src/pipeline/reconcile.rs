//! Aligning a table to the training feature columns

use polars::prelude::*;

use super::error::{PipelineError, PipelineResult};

/// What reconciliation had to change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    /// Training columns missing from the table, filled with zeros
    pub filled: Vec<String>,
    /// Table columns not among the training columns, dropped
    pub dropped: Vec<String>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.filled.is_empty() && self.dropped.is_empty()
    }
}

/// Reorder `df` to exactly `feature_columns`.
///
/// Columns absent from `df` become all-zero `Float64` columns; columns of `df`
/// outside `feature_columns` are dropped.
pub fn reconcile_columns(
    df: &DataFrame,
    feature_columns: &[String],
) -> PipelineResult<(DataFrame, ReconcileReport)> {
    let height = df.height();
    let mut report = ReconcileReport::default();

    let mut columns: Vec<Column> = Vec::with_capacity(feature_columns.len());
    for name in feature_columns {
        match df.column(name) {
            Ok(column) => columns.push(column.clone()),
            Err(_) => {
                report.filled.push(name.clone());
                columns.push(Column::new(name.as_str().into(), vec![0.0f64; height]));
            }
        }
    }

    report.dropped = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .filter(|name| !feature_columns.contains(name))
        .collect();

    let reconciled = DataFrame::new(columns)?;
    Ok((reconciled, report))
}

/// Fail on the first feature column that is neither numeric nor boolean
pub fn ensure_numeric_features(df: &DataFrame) -> PipelineResult<()> {
    for column in df.get_columns() {
        let dtype = column.dtype();
        if !(dtype.is_primitive_numeric() || dtype == &DataType::Boolean) {
            return Err(PipelineError::NonNumericFeature {
                column: column.name().to_string(),
                dtype: dtype.to_string(),
            });
        }
    }
    Ok(())
}
