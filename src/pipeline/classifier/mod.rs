//! Binary classification behind a fit/predict seam
//!
//! The pipeline only needs `fit(features, labels)` and `predict(features)`;
//! any model implementing [`BinaryClassifier`] can be plugged in. The shipped
//! implementation is an L2-regularised logistic regression fitted by Newton's
//! method.

mod logistic;

use std::fmt;

use faer::Mat;

use super::error::PipelineResult;

pub use logistic::{FittedLogisticRegression, LogisticRegression};

/// Reported when the solver stops with the gradient above tolerance
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceWarning {
    /// Iterations performed
    pub iterations: usize,
    /// True when the line search found no descent before the budget ran out
    pub stalled: bool,
    /// Largest absolute gradient component at the last iterate
    pub gradient_norm: f64,
    /// Tolerance the gradient had to fall below
    pub tolerance: f64,
}

impl fmt::Display for ConvergenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stalled {
            write!(
                f,
                "Solver stalled after {} iterations: no further descent (gradient {:.2e} > tolerance {:.2e}); using last iterate",
                self.iterations, self.gradient_norm, self.tolerance
            )
        } else {
            write!(
                f,
                "Solver did not converge within {} iterations (gradient {:.2e} > tolerance {:.2e}); using last iterate",
                self.iterations, self.gradient_norm, self.tolerance
            )
        }
    }
}

/// A fitted model together with how the fit went
#[derive(Debug, Clone)]
pub struct TrainingOutcome<M> {
    pub model: M,
    pub iterations: usize,
    pub convergence_warning: Option<ConvergenceWarning>,
}

/// A trainable binary classifier. Labels are 0/1; features are row-major
/// samples (one row per sample).
pub trait BinaryClassifier {
    type Model: FittedClassifier;

    fn fit(&self, features: &Mat<f64>, labels: &[u8]) -> PipelineResult<TrainingOutcome<Self::Model>>;
}

/// A fitted binary classifier
pub trait FittedClassifier {
    /// Predict a 0/1 label for every row of `features`
    fn predict(&self, features: &Mat<f64>) -> Vec<u8>;
}
