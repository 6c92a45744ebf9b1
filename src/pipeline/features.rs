//! Fitted preparation statistics and the feature sets they produce
//!
//! [`FitStatistics::fit`] is the only place statistics are computed, and it
//! only ever sees the training table. [`FitStatistics::transform`] is a pure
//! function of the statistics and its input table, used identically for the
//! training and the evaluation table.

use faer::Mat;
use polars::prelude::*;
use serde::Serialize;

use super::config::PipelineConfig;
use super::encoding::EncodingPlan;
use super::error::{PipelineError, PipelineResult};
use super::impute::{apply_medians, column_values, fit_medians, ColumnMedian};
use super::reconcile::{ensure_numeric_features, reconcile_columns, ReconcileReport};
use super::scale::{apply_scaling, fit_scaling, ColumnScaling};
use super::text::drop_text_columns;
use crate::utils::StageReporter;

/// A fully numeric table: `Float64` columns in training feature order, no
/// missing values
#[derive(Debug, Clone)]
pub struct FeatureSet {
    frame: DataFrame,
}

impl FeatureSet {
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// Dense `rows x features` matrix for the classifier
    pub fn to_matrix(&self) -> PipelineResult<Mat<f64>> {
        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(self.width());
        for name in self.column_names() {
            let values = column_values(&self.frame, &name)?
                .into_iter()
                .collect::<Option<Vec<f64>>>()
                .ok_or_else(|| PipelineError::DegenerateColumn {
                    column: name.clone(),
                })?;
            columns.push(values);
        }
        Ok(Mat::from_fn(self.height(), columns.len(), |i, j| columns[j][i]))
    }
}

/// Everything learned from the training table in one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitStatistics {
    pub encoding: EncodingPlan,
    /// Configured text columns, dropped from any table they appear in
    pub text_columns: Vec<String>,
    /// Text columns that were present in the training table
    pub dropped_text_columns: Vec<String>,
    /// Final feature columns, in order
    pub feature_columns: Vec<String>,
    pub medians: Vec<ColumnMedian>,
    pub scaling: Vec<ColumnScaling>,
}

impl FitStatistics {
    /// Learn all statistics from the training features (label and id removed)
    /// and return them with the prepared training feature set.
    ///
    /// # Errors
    /// - `NonNumericFeature` if a column is still text after encoding
    /// - `DegenerateColumn` if a training column has no observed values
    pub fn fit(train: &DataFrame, config: &PipelineConfig) -> PipelineResult<(Self, FeatureSet)> {
        let encoding = EncodingPlan::fit(
            train,
            &config.binary_encodings,
            &config.indicator_columns,
        )?;
        let encoded = encoding.apply(train)?;

        let (reduced, dropped_text_columns) = drop_text_columns(&encoded, &config.text_columns);
        ensure_numeric_features(&reduced)?;
        let feature_columns: Vec<String> = reduced
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let medians = fit_medians(&reduced, &feature_columns)?;
        let imputed = apply_medians(&reduced, &medians)?;
        let scaling = fit_scaling(
            &imputed,
            &feature_columns,
            &encoding.indicator_output_columns(),
        )?;

        let statistics = Self {
            encoding,
            text_columns: config.text_columns.clone(),
            dropped_text_columns,
            feature_columns,
            medians,
            scaling,
        };
        let (train_features, _) = statistics.transform(train)?;

        Ok((statistics, train_features))
    }

    /// Apply encoding, text removal, reconciliation, imputation and scaling
    /// to any table with the training schema.
    pub fn transform(&self, df: &DataFrame) -> PipelineResult<(FeatureSet, ReconcileReport)> {
        let encoded = self.encoding.apply(df)?;
        let (reduced, _) = drop_text_columns(&encoded, &self.text_columns);
        let (reconciled, report) = reconcile_columns(&reduced, &self.feature_columns)?;
        let imputed = apply_medians(&reconciled, &self.medians)?;
        let scaled = apply_scaling(&imputed, &self.scaling)?;

        Ok((FeatureSet { frame: scaled }, report))
    }
}

/// Output of the preparation stages
#[derive(Debug, Clone)]
pub struct PreparedFeatures {
    pub statistics: FitStatistics,
    pub train: FeatureSet,
    pub eval: FeatureSet,
    /// How the evaluation table had to be aligned
    pub reconcile: ReconcileReport,
}

/// Run the preparation stages on the training and evaluation feature tables.
///
/// Both tables must already have the label and id columns removed. Statistics
/// are fitted on `train` only.
pub fn prepare_features(
    train: &DataFrame,
    eval: &DataFrame,
    config: &PipelineConfig,
    reporter: &dyn StageReporter,
) -> PipelineResult<PreparedFeatures> {
    reporter.step(3, "Encoding categorical variables");
    let (statistics, train_features) = FitStatistics::fit(train, config)?;
    report_encoding(&statistics, train, reporter);

    let (eval_features, reconcile) = statistics.transform(eval)?;
    if reconcile.is_clean() {
        reporter.detail("Evaluation columns already match training columns");
    } else {
        if !reconcile.filled.is_empty() {
            reporter.detail(&format!(
                "Zero-filled in evaluation: {:?}",
                reconcile.filled
            ));
        }
        if !reconcile.dropped.is_empty() {
            reporter.detail(&format!(
                "Dropped from evaluation: {:?}",
                reconcile.dropped
            ));
        }
    }
    reporter.success(&format!(
        "{} feature column(s) aligned",
        statistics.feature_columns.len()
    ));

    reporter.step(4, "Imputing missing values with training medians");
    let imputed: Vec<&ColumnMedian> = statistics
        .medians
        .iter()
        .filter(|m| m.missing_in_train > 0)
        .collect();
    if imputed.is_empty() {
        reporter.info("No missing values in training features");
    }
    for entry in imputed {
        reporter.detail(&format!(
            "'{}': {} missing -> median {:.4}",
            entry.column, entry.missing_in_train, entry.median
        ));
    }
    reporter.success("Imputed training and evaluation features");

    reporter.step(5, "Scaling numeric features (z-score)");
    let scaled = statistics.scaling.iter().filter(|s| s.scaled).count();
    reporter.detail(&format!(
        "{} scaled, {} indicator column(s) kept as 0/1",
        scaled,
        statistics.scaling.len() - scaled
    ));
    for degenerate in statistics.scaling.iter().filter(|s| s.is_degenerate()) {
        reporter.warning(&format!(
            "'{}' is constant in training data; scaled to 0",
            degenerate.column
        ));
    }
    reporter.success("Scaled with training mean and standard deviation");

    Ok(PreparedFeatures {
        statistics,
        train: train_features,
        eval: eval_features,
        reconcile,
    })
}

fn report_encoding(statistics: &FitStatistics, train: &DataFrame, reporter: &dyn StageReporter) {
    for binary in &statistics.encoding.binary {
        if train.column(&binary.column).is_ok() {
            reporter.detail(&format!("Encoding '{}' with {:?}", binary.column, binary.mapping));
        }
    }
    for indicator in &statistics.encoding.indicators {
        reporter.detail(&format!(
            "One-hot encoding '{}' (reference level {:?}) -> {:?}",
            indicator.column,
            indicator.reference_level.as_deref().unwrap_or("none"),
            indicator.output_columns()
        ));
    }
    if !statistics.dropped_text_columns.is_empty() {
        reporter.detail(&format!(
            "Dropping text columns: {:?}",
            statistics.dropped_text_columns
        ));
    }
}
