//! Categorical encoding with mappings fixed before the evaluation table is seen
//!
//! Binary columns use a configured `{category: code}` table. Multi-valued
//! columns are expanded into indicator columns whose levels are learned from
//! the training table only; the first level (lexicographic) is the reference
//! level and gets no column.

use polars::prelude::*;
use serde::Serialize;

use super::config::BinaryEncoding;
use super::error::PipelineResult;
use super::labels::column_to_string_vec;

/// Separator between source column and level in indicator column names
const INDICATOR_SEPARATOR: char = '_';

/// Indicator expansion of one multi-valued column, learned from training data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorEncoding {
    /// Source column
    pub column: String,
    /// Omitted level, implied when every indicator is zero
    pub reference_level: Option<String>,
    /// Levels that each get an indicator column, in output order
    pub levels: Vec<String>,
}

impl IndicatorEncoding {
    /// Learn levels from the training column's non-null values
    fn fit(column: &Column) -> PolarsResult<Self> {
        let mut observed: Vec<String> = column_to_string_vec(column)?
            .into_iter()
            .flatten()
            .collect();
        observed.sort();
        observed.dedup();

        let mut levels = observed.into_iter();
        let reference_level = levels.next();

        Ok(Self {
            column: column.name().to_string(),
            reference_level,
            levels: levels.collect(),
        })
    }

    /// Names of the indicator columns this encoding produces
    pub fn output_columns(&self) -> Vec<String> {
        self.levels
            .iter()
            .map(|level| indicator_name(&self.column, level))
            .collect()
    }

    fn apply(&self, df: &mut DataFrame) -> PolarsResult<()> {
        let Ok(source) = df.column(&self.column) else {
            return Ok(());
        };
        let values = column_to_string_vec(source)?;

        let indicators: Vec<Column> = self
            .levels
            .iter()
            .map(|level| {
                let hits: Vec<f64> = values
                    .iter()
                    .map(|v| match v {
                        Some(s) if s == level => 1.0,
                        _ => 0.0,
                    })
                    .collect();
                Column::new(indicator_name(&self.column, level).into(), hits)
            })
            .collect();

        *df = df.drop(&self.column)?;
        for indicator in indicators {
            df.with_column(indicator)?;
        }
        Ok(())
    }
}

fn indicator_name(column: &str, level: &str) -> String {
    format!("{}{}{}", column, INDICATOR_SEPARATOR, level)
}

/// All categorical encodings for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EncodingPlan {
    pub binary: Vec<BinaryEncoding>,
    pub indicators: Vec<IndicatorEncoding>,
}

impl EncodingPlan {
    /// Build the plan from the training table.
    ///
    /// Binary mappings come from configuration as-is. Indicator levels are
    /// learned from `train`; an indicator column missing from `train` is skipped.
    pub fn fit(
        train: &DataFrame,
        binary: &[BinaryEncoding],
        indicator_columns: &[String],
    ) -> PipelineResult<Self> {
        let mut indicators = Vec::new();
        for name in indicator_columns {
            if let Ok(column) = train.column(name) {
                indicators.push(IndicatorEncoding::fit(column)?);
            }
        }

        Ok(Self {
            binary: binary.to_vec(),
            indicators,
        })
    }

    /// Apply the plan to any table, returning a new table.
    ///
    /// Configured columns absent from `df` are left alone, as are binary
    /// columns that are already numeric, so applying the plan to an encoded
    /// table changes nothing.
    pub fn apply(&self, df: &DataFrame) -> PipelineResult<DataFrame> {
        let mut out = df.clone();

        for encoding in &self.binary {
            let Ok(column) = out.column(&encoding.column) else {
                continue;
            };
            if column.dtype().is_primitive_numeric() {
                continue;
            }
            let codes: Vec<Option<i32>> = column_to_string_vec(column)?
                .into_iter()
                .map(|v| v.and_then(|s| encoding.mapping.get(&s).copied()))
                .collect();
            out.with_column(Column::new(encoding.column.as_str().into(), codes))?;
        }

        for indicator in &self.indicators {
            indicator.apply(&mut out)?;
        }

        Ok(out)
    }

    /// Every indicator column the plan can produce
    pub fn indicator_output_columns(&self) -> Vec<String> {
        self.indicators
            .iter()
            .flat_map(|i| i.output_columns())
            .collect()
    }
}
