//! Pipeline module - train-only feature preparation, training and evaluation

pub mod classifier;
pub mod config;
pub mod encoding;
pub mod error;
pub mod evaluate;
pub mod features;
pub mod impute;
pub mod labels;
pub mod loader;
pub mod reconcile;
pub mod run;
pub mod scale;
pub mod text;

pub use classifier::{
    BinaryClassifier, ConvergenceWarning, FittedClassifier, FittedLogisticRegression,
    LogisticRegression, TrainingOutcome,
};
pub use config::{BinaryEncoding, ModelConfig, PipelineConfig};
pub use encoding::{EncodingPlan, IndicatorEncoding};
pub use error::{PipelineError, PipelineResult, TableRole};
pub use evaluate::{accuracy, align_ground_truth, build_predictions};
pub use features::{prepare_features, FeatureSet, FitStatistics, PreparedFeatures};
pub use impute::{apply_medians, fit_medians, median, ColumnMedian};
pub use labels::extract_labels;
pub use loader::{load_dataset, save_dataset};
pub use reconcile::{ensure_numeric_features, reconcile_columns, ReconcileReport};
pub use run::{run_pipeline, PipelineRun};
pub use scale::{apply_scaling, fit_scaling, ColumnScaling};
pub use text::drop_text_columns;
