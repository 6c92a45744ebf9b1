//! Binary label extraction and value rendering helpers
//!
//! The label column must already be a 0/1 target; multi-class and regression
//! targets are rejected rather than mapped.

use polars::prelude::*;

use super::error::{PipelineError, PipelineResult, TableRole};

/// Tolerance for floating point comparison when checking binary 0/1 values
const TOLERANCE: f64 = 1e-9;

/// Extract the label column of the training table as 0/1 values
///
/// # Errors
/// - `MissingColumn` if the column does not exist
/// - `InvalidLabel` if it contains nulls or any value other than 0 and 1
pub fn extract_labels(df: &DataFrame, label: &str) -> PipelineResult<Vec<u8>> {
    let column = df
        .column(label)
        .map_err(|_| PipelineError::MissingColumn {
            column: label.to_string(),
            table: TableRole::Training,
        })?;
    labels_from_column(column)
}

/// Convert a label column into 0/1 values
pub fn labels_from_column(column: &Column) -> PipelineResult<Vec<u8>> {
    let name = column.name().to_string();
    let invalid = |reason: String| PipelineError::InvalidLabel {
        column: name.clone(),
        reason,
    };

    if column.null_count() > 0 {
        return Err(invalid(format!(
            "{} missing value(s)",
            column.null_count()
        )));
    }

    let is_numeric = column.dtype().is_primitive_numeric() || column.dtype() == &DataType::Boolean;
    if !is_numeric {
        let mut unique = column_to_string_vec(column)?
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        unique.sort();
        unique.dedup();
        return Err(invalid(format!("non-numeric values {:?}", unique)));
    }

    let float_col = column.cast(&DataType::Float64)?;
    let mut labels = Vec::with_capacity(float_col.len());
    for value in float_col.f64()?.into_iter().flatten() {
        if (value - 0.0).abs() < TOLERANCE {
            labels.push(0);
        } else if (value - 1.0).abs() < TOLERANCE {
            labels.push(1);
        } else {
            return Err(invalid(format!("found value {}", value)));
        }
    }

    Ok(labels)
}

/// Render a column as optional strings, used for category levels and id joins.
///
/// Integer and float columns render without a fractional part when it is zero,
/// so an `Int64` id `3` and a `Float64` id `3.0` compare equal.
pub fn column_to_string_vec(col: &Column) -> PolarsResult<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = col.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = col.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.filter(|n| !n.is_nan()).map(|n| format!("{}", n)))
                .collect()
        }
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}
