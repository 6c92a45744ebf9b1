//! Leakless: leakage-safe tabular classification
//!
//! Categorical encoding, text-column removal, schema reconciliation, median
//! imputation and standard scaling are fitted on the training table only and
//! then applied unchanged to the evaluation table before a logistic
//! regression is trained and used for prediction.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
