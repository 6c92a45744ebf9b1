//! L2-regularised logistic regression fitted with damped Newton steps
//!
//! Minimises
//!
//! ```text
//! J(w, b) = mean(log(1 + exp(z_i)) - y_i * z_i) + ||w||^2 / (2 * C * n),   z = Xw + b
//! ```
//!
//! which has the same minimiser as `0.5 * ||w||^2 + C * sum(logloss)`. The
//! intercept is not penalised. Each iteration solves `H d = g` with a dense LU
//! factorisation and backtracks along `d` until `J` decreases.

use faer::prelude::*;
use faer::Mat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::{BinaryClassifier, ConvergenceWarning, FittedClassifier, TrainingOutcome};
use crate::pipeline::config::ModelConfig;
use crate::pipeline::error::{PipelineError, PipelineResult, TableRole};

/// Half-width of the uniform range for initial coefficients
const INIT_SCALE: f64 = 1e-3;

/// Armijo sufficient-decrease constant
const ARMIJO: f64 = 1e-4;

/// Backtracking halvings before a step is abandoned
const MAX_HALVINGS: usize = 40;

/// Unfitted logistic regression settings
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    seed: u64,
    max_iter: usize,
    tolerance: f64,
    inverse_regularization: f64,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::from_config(&ModelConfig::default())
    }
}

impl LogisticRegression {
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            seed: config.seed,
            max_iter: config.max_iter,
            tolerance: config.tolerance,
            inverse_regularization: config.inverse_regularization,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_inverse_regularization(mut self, c: f64) -> Self {
        self.inverse_regularization = c;
        self
    }

    /// Penalty weight on each coefficient in the normalised objective
    fn penalty(&self, n_samples: usize) -> f64 {
        1.0 / (self.inverse_regularization * n_samples as f64)
    }

    fn initial_parameters(&self, n_features: usize) -> Mat<f64> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut theta = Mat::<f64>::zeros(n_features + 1, 1);
        for j in 0..n_features {
            theta[(j, 0)] = rng.gen_range(-INIT_SCALE..INIT_SCALE);
        }
        theta
    }
}

/// Fitted coefficients and intercept
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FittedLogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl FittedLogisticRegression {
    /// Probability of label 1 for every row of `features`
    pub fn predict_proba(&self, features: &Mat<f64>) -> Vec<f64> {
        (0..features.nrows())
            .map(|i| {
                let z = self.intercept
                    + self
                        .coefficients
                        .iter()
                        .enumerate()
                        .map(|(j, w)| w * features[(i, j)])
                        .sum::<f64>();
                sigmoid(z)
            })
            .collect()
    }
}

impl FittedClassifier for FittedLogisticRegression {
    fn predict(&self, features: &Mat<f64>) -> Vec<u8> {
        self.predict_proba(features)
            .into_iter()
            .map(|p| u8::from(p >= 0.5))
            .collect()
    }
}

impl BinaryClassifier for LogisticRegression {
    type Model = FittedLogisticRegression;

    fn fit(
        &self,
        features: &Mat<f64>,
        labels: &[u8],
    ) -> PipelineResult<TrainingOutcome<FittedLogisticRegression>> {
        let n = features.nrows();
        let p = features.ncols();

        if n == 0 {
            return Err(PipelineError::EmptyTable {
                table: TableRole::Training,
            });
        }
        if labels.len() != n {
            return Err(PipelineError::Solver(format!(
                "{} feature rows but {} labels",
                n,
                labels.len()
            )));
        }

        // Design matrix with a trailing column of ones for the intercept
        let design = Mat::from_fn(n, p + 1, |i, j| if j < p { features[(i, j)] } else { 1.0 });
        let targets: Vec<f64> = labels.iter().map(|&y| f64::from(y)).collect();
        let penalty = self.penalty(n);

        let mut theta = self.initial_parameters(p);
        let mut iterations = 0;
        let mut converged = false;
        let mut stalled = false;

        while iterations < self.max_iter {
            let z = linear_predictor(&design, &theta);
            let gradient = gradient(&design, &theta, &z, &targets, penalty);
            if max_abs(&gradient) < self.tolerance {
                converged = true;
                break;
            }

            let hessian = hessian(&design, &z, penalty);
            let direction = hessian.partial_piv_lu().solve(&gradient);
            if (0..direction.nrows()).any(|j| !direction[(j, 0)].is_finite()) {
                return Err(PipelineError::Solver(
                    "Newton system is singular".to_string(),
                ));
            }

            iterations += 1;
            let current = objective(&z, &theta, &targets, penalty);
            let slope: f64 = (0..gradient.nrows())
                .map(|j| gradient[(j, 0)] * direction[(j, 0)])
                .sum();

            let mut step = 1.0;
            let mut accepted = None;
            for _ in 0..MAX_HALVINGS {
                let candidate = Mat::from_fn(theta.nrows(), 1, |j, _| {
                    theta[(j, 0)] - step * direction[(j, 0)]
                });
                let candidate_z = linear_predictor(&design, &candidate);
                if objective(&candidate_z, &candidate, &targets, penalty)
                    <= current - ARMIJO * step * slope
                {
                    accepted = Some(candidate);
                    break;
                }
                step *= 0.5;
            }

            match accepted {
                Some(next) => theta = next,
                // No descent left at machine precision
                None => {
                    stalled = true;
                    break;
                }
            }
        }

        let final_gradient = if converged {
            0.0
        } else {
            let z = linear_predictor(&design, &theta);
            max_abs(&gradient(&design, &theta, &z, &targets, penalty))
        };
        let convergence_warning = if converged || final_gradient < self.tolerance {
            None
        } else {
            Some(ConvergenceWarning {
                iterations,
                stalled,
                gradient_norm: final_gradient,
                tolerance: self.tolerance,
            })
        };

        let model = FittedLogisticRegression {
            coefficients: (0..p).map(|j| theta[(j, 0)]).collect(),
            intercept: theta[(p, 0)],
        };

        Ok(TrainingOutcome {
            model,
            iterations,
            convergence_warning,
        })
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `log(1 + exp(z))` without overflow
fn softplus(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}

fn linear_predictor(design: &Mat<f64>, theta: &Mat<f64>) -> Vec<f64> {
    let z = design.as_ref() * theta;
    (0..z.nrows()).map(|i| z[(i, 0)]).collect()
}

fn objective(z: &[f64], theta: &Mat<f64>, targets: &[f64], penalty: f64) -> f64 {
    let n = z.len() as f64;
    let loss: f64 = z
        .iter()
        .zip(targets)
        .map(|(&zi, &yi)| softplus(zi) - yi * zi)
        .sum::<f64>()
        / n;
    // The last parameter is the intercept and is not penalised
    let weights = theta.nrows() - 1;
    let norm: f64 = (0..weights).map(|j| theta[(j, 0)].powi(2)).sum();
    loss + 0.5 * penalty * norm
}

fn gradient(design: &Mat<f64>, theta: &Mat<f64>, z: &[f64], targets: &[f64], penalty: f64) -> Mat<f64> {
    let n = z.len();
    let residual = Mat::from_fn(n, 1, |i, _| (sigmoid(z[i]) - targets[i]) / n as f64);
    let mut grad = design.transpose() * &residual;
    for j in 0..theta.nrows() - 1 {
        grad[(j, 0)] += penalty * theta[(j, 0)];
    }
    grad
}

fn hessian(design: &Mat<f64>, z: &[f64], penalty: f64) -> Mat<f64> {
    let n = z.len();
    let weighted = Mat::from_fn(n, design.ncols(), |i, j| {
        let s = sigmoid(z[i]);
        design[(i, j)] * (s * (1.0 - s) / n as f64).sqrt()
    });
    let mut h = weighted.transpose() * &weighted;
    for j in 0..h.nrows() - 1 {
        h[(j, j)] += penalty;
    }
    h
}

fn max_abs(m: &Mat<f64>) -> f64 {
    (0..m.nrows()).map(|j| m[(j, 0)].abs()).fold(0.0, f64::max)
}
