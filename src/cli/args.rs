//! Command-line argument definitions using clap

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::pipeline::PipelineConfig;

/// Leakless - Train a classifier with train-only statistics and predict an evaluation table
#[derive(Parser, Debug)]
#[command(name = "leakless")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Training table (CSV or Parquet) containing the label column
    #[arg(short = 'r', long)]
    pub train: PathBuf,

    /// Evaluation table (CSV or Parquet) without the label column
    #[arg(short = 'e', long)]
    pub test: PathBuf,

    /// Prediction output path (CSV or Parquet, determined by extension).
    /// Defaults to 'predictions.csv' next to the evaluation file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Optional ground-truth table keyed by the identifier column.
    /// When given, evaluation accuracy is reported.
    #[arg(long)]
    pub truth: Option<PathBuf>,

    /// JSON pipeline configuration. Flags below override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Label column name
    #[arg(short, long)]
    pub label: Option<String>,

    /// Identifier column name
    #[arg(long)]
    pub id: Option<String>,

    /// Seed for the classifier's initial coefficients
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum number of solver iterations
    #[arg(long, value_parser = validate_max_iter)]
    pub max_iter: Option<usize>,

    /// Convergence tolerance on the gradient norm
    #[arg(long, value_parser = validate_positive)]
    pub tolerance: Option<f64>,

    /// Inverse L2 regularisation strength (larger means weaker penalty)
    #[arg(long, value_parser = validate_positive)]
    pub regularization_c: Option<f64>,

    /// Free-text columns to drop (comma-separated).
    /// Replaces the configured list when given.
    #[arg(long, value_delimiter = ',')]
    pub drop_columns: Option<Vec<String>>,

    /// Write fitted statistics and model results to this JSON file
    #[arg(long)]
    pub stats_output: Option<PathBuf>,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Suppress progress output
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Get the output path, defaulting to 'predictions.csv' in the evaluation file's directory.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let parent = self.test.parent().unwrap_or_else(|| Path::new("."));
            parent.join("predictions.csv")
        })
    }

    /// Apply command-line overrides on top of a base configuration
    pub fn apply_overrides(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(label) = &self.label {
            config.label_column = label.clone();
        }
        if let Some(id) = &self.id {
            config.id_column = id.clone();
        }
        if let Some(seed) = self.seed {
            config.model.seed = seed;
        }
        if let Some(max_iter) = self.max_iter {
            config.model.max_iter = max_iter;
        }
        if let Some(tolerance) = self.tolerance {
            config.model.tolerance = tolerance;
        }
        if let Some(c) = self.regularization_c {
            config.model.inverse_regularization = c;
        }
        if let Some(columns) = &self.drop_columns {
            config.text_columns = columns
                .iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
        }
        config
    }
}

/// Validator for strictly positive float parameters
fn validate_positive(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !value.is_finite() || value <= 0.0 {
        Err(format!("value must be a positive number, got {}", value))
    } else {
        Ok(value)
    }
}

/// Validator for max_iter parameter
fn validate_max_iter(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid iteration count", s))?;

    if value == 0 {
        Err("max_iter must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["leakless"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--train", "data/train.csv", "--test", "data/test.csv"]);
        assert_eq!(cli.output_path(), PathBuf::from("data/predictions.csv"));
        assert_eq!(cli.infer_schema_length, 10000);
        assert!(!cli.no_confirm);
        assert!(!cli.quiet);
        assert!(cli.drop_columns.is_none());
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = parse(&[
            "-r",
            "train.csv",
            "-e",
            "test.csv",
            "--label",
            "Target",
            "--seed",
            "7",
            "--regularization-c",
            "0.5",
            "--drop-columns",
            "Name, Ticket",
        ]);
        let config = cli.apply_overrides(PipelineConfig::default());
        assert_eq!(config.label_column, "Target");
        assert_eq!(config.id_column, "PassengerId");
        assert_eq!(config.model.seed, 7);
        assert_eq!(config.model.inverse_regularization, 0.5);
        assert_eq!(config.text_columns, vec!["Name", "Ticket"]);
    }

    #[test]
    fn test_rejects_non_positive_values() {
        assert!(validate_positive("0").is_err());
        assert!(validate_positive("-1.5").is_err());
        assert!(validate_positive("abc").is_err());
        assert_eq!(validate_positive("0.25"), Ok(0.25));
        assert!(validate_max_iter("0").is_err());
        assert_eq!(validate_max_iter("50"), Ok(50));
    }

    #[test]
    fn test_missing_required_flags() {
        assert!(Cli::try_parse_from(["leakless", "--train", "train.csv"]).is_err());
    }
}
