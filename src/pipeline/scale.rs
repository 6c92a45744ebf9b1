//! Z-score scaling with training-derived parameters

use polars::prelude::*;
use serde::Serialize;

use super::error::PipelineResult;
use super::impute::column_values;

/// Location and spread of one training column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnScaling {
    pub column: String,
    pub mean: f64,
    /// Population standard deviation (ddof = 0)
    pub std_dev: f64,
    /// False for columns passed through unchanged (indicator columns)
    pub scaled: bool,
}

impl ColumnScaling {
    /// Scale a single value. A zero-variance column maps every value to 0.
    pub fn transform(&self, x: f64) -> f64 {
        if !self.scaled {
            x
        } else if self.std_dev == 0.0 {
            0.0
        } else {
            (x - self.mean) / self.std_dev
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.scaled && self.std_dev == 0.0
    }
}

/// Compute mean and population std of each column over its non-missing values.
///
/// Columns listed in `passthrough` are recorded with `scaled = false`.
pub fn fit_scaling(
    train: &DataFrame,
    columns: &[String],
    passthrough: &[String],
) -> PipelineResult<Vec<ColumnScaling>> {
    let mut params = Vec::with_capacity(columns.len());

    for name in columns {
        let values: Vec<f64> = column_values(train, name)?.into_iter().flatten().collect();
        let n = values.len() as f64;

        // A constant column is degenerate even when rounding makes its std nonzero
        let constant = values.windows(2).all(|pair| pair[0] == pair[1]);

        let (mean, std_dev) = if values.is_empty() {
            (0.0, 0.0)
        } else if constant {
            (values[0], 0.0)
        } else {
            let mean = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
            (mean, variance.sqrt())
        };

        params.push(ColumnScaling {
            column: name.clone(),
            mean,
            std_dev,
            scaled: !passthrough.contains(name),
        });
    }

    Ok(params)
}

/// Apply scaling parameters to a table, leaving other columns untouched
pub fn apply_scaling(df: &DataFrame, scaling: &[ColumnScaling]) -> PipelineResult<DataFrame> {
    let mut out = df.clone();
    for params in scaling {
        let scaled: Vec<Option<f64>> = column_values(df, &params.column)?
            .into_iter()
            .map(|v| v.map(|x| params.transform(x)))
            .collect();
        out.with_column(Column::new(params.column.as_str().into(), scaled))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(df: &DataFrame, name: &str) -> Vec<f64> {
        df.column(name).unwrap().f64().unwrap().into_iter().flatten().collect()
    }

    #[test]
    fn test_population_std_and_zero_mean() {
        let train = df! { "Age" => [22.0f64, 28.0, 35.0, 28.0] }.unwrap();
        let scaling = fit_scaling(&train, &["Age".to_string()], &[]).unwrap();

        assert!((scaling[0].mean - 28.25).abs() < 1e-12);
        let expected_std = ((6.25f64.powi(2) + 0.25f64.powi(2) + 6.75f64.powi(2) + 0.25f64.powi(2)) / 4.0).sqrt();
        assert!((scaling[0].std_dev - expected_std).abs() < 1e-12);

        let scaled = apply_scaling(&train, &scaling).unwrap();
        let mean: f64 = values(&scaled, "Age").iter().sum::<f64>() / 4.0;
        assert!(mean.abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_scales_to_zero() {
        let train = df! { "Parch" => [0.0f64, 0.0, 0.0] }.unwrap();
        let eval = df! { "Parch" => [0.0f64, 2.0, 5.0] }.unwrap();
        let scaling = fit_scaling(&train, &["Parch".to_string()], &[]).unwrap();

        assert!(scaling[0].is_degenerate());
        let scaled = apply_scaling(&eval, &scaling).unwrap();
        assert_eq!(values(&scaled, "Parch"), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_inexact_constant_is_degenerate() {
        let train = df! {
            "Fare" => [0.1f64, 0.1, 0.1],
            "Toll" => [7.25f64, 7.25, 7.25],
        }
        .unwrap();
        let eval = df! {
            "Fare" => [0.1f64, 0.2],
            "Toll" => [7.25f64, 9.0],
        }
        .unwrap();
        let columns = ["Fare".to_string(), "Toll".to_string()];
        let scaling = fit_scaling(&train, &columns, &[]).unwrap();

        assert!(scaling.iter().all(|s| s.is_degenerate()));
        assert_eq!(scaling[0].std_dev, 0.0);

        let scaled_train = apply_scaling(&train, &scaling).unwrap();
        assert_eq!(values(&scaled_train, "Fare"), vec![0.0, 0.0, 0.0]);
        assert_eq!(values(&scaled_train, "Toll"), vec![0.0, 0.0, 0.0]);

        let scaled_eval = apply_scaling(&eval, &scaling).unwrap();
        assert_eq!(values(&scaled_eval, "Fare"), vec![0.0, 0.0]);
        assert_eq!(values(&scaled_eval, "Toll"), vec![0.0, 0.0]);
    }

    #[test]
    fn test_passthrough_columns_untouched() {
        let train = df! {
            "Fare" => [10.0f64, 20.0],
            "Embarked_S" => [1.0f64, 0.0],
        }
        .unwrap();
        let scaling = fit_scaling(
            &train,
            &["Fare".to_string(), "Embarked_S".to_string()],
            &["Embarked_S".to_string()],
        )
        .unwrap();
        let scaled = apply_scaling(&train, &scaling).unwrap();

        assert_eq!(values(&scaled, "Fare"), vec![-1.0, 1.0]);
        assert_eq!(values(&scaled, "Embarked_S"), vec![1.0, 0.0]);
    }

    #[test]
    fn test_eval_uses_training_parameters() {
        let train = df! { "Fare" => [10.0f64, 20.0] }.unwrap();
        let eval = df! { "Fare" => [1000.0f64, 2000.0] }.unwrap();
        let scaling = fit_scaling(&train, &["Fare".to_string()], &[]).unwrap();

        let scaled = apply_scaling(&eval, &scaling).unwrap();
        assert_eq!(values(&scaled, "Fare"), vec![197.0, 397.0]);
    }
}
