//! Pipeline configuration: column roles, categorical mappings and model settings
//!
//! Defaults describe the passenger-survival dataset (`Survived` label,
//! `PassengerId` identifier). Any other dataset with the same shape can be
//! described by a JSON file with the same field names.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::{PipelineError, PipelineResult};

/// Fixed `{category: code}` mapping for a two-valued categorical column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryEncoding {
    /// Column to encode
    pub column: String,
    /// Category to code; codes must be exactly {0, 1}
    pub mapping: BTreeMap<String, i32>,
}

impl BinaryEncoding {
    pub fn new(column: &str, zero: &str, one: &str) -> Self {
        let mut mapping = BTreeMap::new();
        mapping.insert(zero.to_string(), 0);
        mapping.insert(one.to_string(), 1);
        Self {
            column: column.to_string(),
            mapping,
        }
    }

    fn validate(&self) -> PipelineResult<()> {
        let mut codes: Vec<i32> = self.mapping.values().copied().collect();
        codes.sort_unstable();
        if codes != [0, 1] {
            return Err(PipelineError::InvalidConfig(format!(
                "binary encoding for '{}' must map exactly two categories to 0 and 1, got {:?}",
                self.column, self.mapping
            )));
        }
        Ok(())
    }
}

/// Settings for the logistic regression classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Seed for coefficient initialisation
    pub seed: u64,
    /// Newton iteration budget
    pub max_iter: usize,
    /// Stop when the largest gradient component falls below this value
    pub tolerance: f64,
    /// Inverse L2 regularisation strength (larger = weaker penalty)
    pub inverse_regularization: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_iter: 1000,
            tolerance: 1e-4,
            inverse_regularization: 1.0,
        }
    }
}

/// Complete description of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Binary target column, present only in the training table
    pub label_column: String,
    /// Row identifier, carried into the prediction output
    pub id_column: String,
    /// Two-valued categorical columns with fixed codes
    pub binary_encodings: Vec<BinaryEncoding>,
    /// Multi-valued categorical columns expanded into indicator columns
    pub indicator_columns: Vec<String>,
    /// Free-text columns removed before reconciliation
    pub text_columns: Vec<String>,
    pub model: ModelConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label_column: "Survived".to_string(),
            id_column: "PassengerId".to_string(),
            binary_encodings: vec![BinaryEncoding::new("Sex", "male", "female")],
            indicator_columns: vec!["Embarked".to_string()],
            text_columns: vec![
                "Name".to_string(),
                "Ticket".to_string(),
                "Cabin".to_string(),
            ],
            model: ModelConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file; omitted fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: PipelineConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency of the configuration
    pub fn validate(&self) -> PipelineResult<()> {
        if self.label_column.is_empty() || self.id_column.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "label and id column names must not be empty".to_string(),
            ));
        }
        if self.label_column == self.id_column {
            return Err(PipelineError::InvalidConfig(format!(
                "label and id column are both '{}'",
                self.label_column
            )));
        }
        for encoding in &self.binary_encodings {
            encoding.validate()?;
        }
        let reserved = [&self.label_column, &self.id_column];
        let configured = self
            .binary_encodings
            .iter()
            .map(|e| &e.column)
            .chain(self.indicator_columns.iter())
            .chain(self.text_columns.iter());
        for column in configured {
            if reserved.contains(&column) {
                return Err(PipelineError::InvalidConfig(format!(
                    "column '{}' is the label or id and cannot be encoded or dropped",
                    column
                )));
            }
        }
        if !(self.model.inverse_regularization > 0.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "inverse regularization must be positive, got {}",
                self.model.inverse_regularization
            )));
        }
        if self.model.max_iter == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_iter must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
