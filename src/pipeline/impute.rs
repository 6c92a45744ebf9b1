//! Median imputation of missing numeric values
//!
//! Medians are computed from the training table only and then applied to any
//! table. Null and NaN are both treated as missing.

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::error::{PipelineError, PipelineResult};

/// Training median of one feature column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMedian {
    pub column: String,
    pub median: f64,
    /// Missing values observed in the training column
    pub missing_in_train: usize,
}

/// Read a column as `f64`, mapping null and NaN to `None`
pub fn column_values(df: &DataFrame, name: &str) -> PipelineResult<Vec<Option<f64>>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    let values = column
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(values)
}

/// Median of a slice; the mean of the two middle values for even lengths
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Compute the training median of every column in `columns`.
///
/// # Errors
/// `DegenerateColumn` for the first column (in `columns` order) with no
/// non-missing value.
pub fn fit_medians(train: &DataFrame, columns: &[String]) -> PipelineResult<Vec<ColumnMedian>> {
    let extracted: Vec<(String, Vec<Option<f64>>)> = columns
        .iter()
        .map(|name| Ok((name.clone(), column_values(train, name)?)))
        .collect::<PipelineResult<_>>()?;

    extracted
        .par_iter()
        .map(|(name, values)| {
            let present: Vec<f64> = values.iter().flatten().copied().collect();
            let median = median(&present).ok_or_else(|| PipelineError::DegenerateColumn {
                column: name.clone(),
            })?;
            Ok(ColumnMedian {
                column: name.clone(),
                median,
                missing_in_train: values.len() - present.len(),
            })
        })
        .collect()
}

/// Fill missing values with the given medians, casting those columns to `Float64`
pub fn apply_medians(df: &DataFrame, medians: &[ColumnMedian]) -> PipelineResult<DataFrame> {
    let mut out = df.clone();
    for entry in medians {
        let filled: Vec<f64> = column_values(df, &entry.column)?
            .into_iter()
            .map(|v| v.unwrap_or(entry.median))
            .collect();
        out.with_column(Column::new(entry.column.as_str().into(), filled))?;
    }
    Ok(out)
}
