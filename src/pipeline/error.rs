//! Error taxonomy for the preparation and training pipeline

use std::fmt;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Which input table an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    Training,
    Evaluation,
    GroundTruth,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableRole::Training => write!(f, "training"),
            TableRole::Evaluation => write!(f, "evaluation"),
            TableRole::GroundTruth => write!(f, "ground-truth"),
        }
    }
}

/// Fatal pipeline errors.
///
/// Convergence problems are not errors: they travel with the fitted model as a
/// [`ConvergenceWarning`](super::classifier::ConvergenceWarning).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required label or identifier column is absent
    #[error("Required column '{column}' not found in {table} table")]
    MissingColumn { column: String, table: TableRole },

    /// A feature column is still non-numeric after encoding and text-column removal
    #[error(
        "Feature column '{column}' has non-numeric type {dtype} after encoding. \
         Configure it as a categorical or text column."
    )]
    NonNumericFeature { column: String, dtype: String },

    /// A training feature has no observed values, so its median is undefined
    #[error("Training column '{column}' has no non-missing values - median is undefined")]
    DegenerateColumn { column: String },

    /// The label column is not a binary 0/1 target
    #[error("Label column '{column}' is not a binary 0/1 target: {reason}")]
    InvalidLabel { column: String, reason: String },

    /// An evaluation identifier is missing from the ground-truth table
    #[error("Evaluation id '{id}' not found in ground-truth column '{column}'")]
    JoinMismatch { id: String, column: String },

    #[error("The {table} table has no rows")]
    EmptyTable { table: TableRole },

    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    /// The Newton system could not be solved to finite values
    #[error("Logistic regression solver failed: {0}")]
    Solver(String),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
