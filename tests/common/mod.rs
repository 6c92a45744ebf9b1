//! Shared test utilities and fixture generators

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a small Titanic-like training table
///
/// This DataFrame includes:
/// - `PassengerId`, `Survived`: identifier and binary label
/// - `Pclass`, `SibSp`, `Parch`, `Fare`: clean numeric features
/// - `Age`: numeric feature with missing values
/// - `Sex`: binary categorical ("male"/"female")
/// - `Embarked`: multi-valued categorical with one missing value
/// - `Name`, `Ticket`, `Cabin`: free text
pub fn create_titanic_train() -> DataFrame {
    df! {
        "PassengerId" => [1i64, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        "Survived" => [0i64, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 0],
        "Pclass" => [3i64, 1, 3, 1, 3, 3, 1, 3, 3, 2, 3, 2],
        "Name" => [
            "Braund, Mr. Owen", "Cumings, Mrs. John", "Heikkinen, Miss. Laina",
            "Futrelle, Mrs. Jacques", "Allen, Mr. William", "Moran, Mr. James",
            "McCarthy, Mr. Timothy", "Palsson, Master. Gosta", "Johnson, Mrs. Oscar",
            "Nasser, Mrs. Nicholas", "Sandstrom, Miss. Marguerite", "Rice, Master. Eugene",
        ],
        "Sex" => [
            "male", "female", "female", "female", "male", "male",
            "male", "male", "female", "female", "female", "male",
        ],
        "Age" => [
            Some(22.0f64), Some(38.0), Some(26.0), Some(35.0), Some(35.0), None,
            Some(54.0), Some(2.0), Some(27.0), Some(14.0), None, Some(4.0),
        ],
        "SibSp" => [1i64, 1, 0, 1, 0, 0, 0, 3, 0, 1, 1, 4],
        "Parch" => [0i64, 0, 0, 0, 0, 0, 0, 1, 2, 0, 1, 1],
        "Ticket" => [
            "A/5 21171", "PC 17599", "STON/O2. 3101282", "113803", "373450", "330877",
            "17463", "349909", "347742", "237736", "PP 9549", "382652",
        ],
        "Fare" => [7.25f64, 71.2833, 7.925, 53.1, 8.05, 8.4583, 51.8625, 21.075, 11.1333, 30.0708, 16.7, 29.125],
        "Cabin" => [
            None, Some("C85"), None, Some("C123"), None, None,
            Some("E46"), None, None, None, Some("G6"), None,
        ],
        "Embarked" => [
            Some("S"), Some("C"), Some("S"), Some("S"), Some("S"), Some("Q"),
            Some("S"), Some("S"), None, Some("C"), Some("S"), Some("Q"),
        ],
    }
    .unwrap()
}

/// Create a matching evaluation table (no label column, ids out of order)
pub fn create_titanic_test() -> DataFrame {
    df! {
        "PassengerId" => [894i64, 892, 893, 895],
        "Pclass" => [2i64, 3, 3, 3],
        "Name" => ["Myles, Mr. Thomas", "Kelly, Mr. James", "Wilkes, Mrs. James", "Wirz, Mr. Albert"],
        "Sex" => ["male", "male", "female", "male"],
        "Age" => [Some(62.0f64), Some(34.5), Some(47.0), None],
        "SibSp" => [0i64, 0, 1, 0],
        "Parch" => [0i64, 0, 0, 0],
        "Ticket" => ["240276", "330911", "363272", "315154"],
        "Fare" => [9.6875f64, 7.8292, 7.0, 8.6625],
        "Cabin" => [None::<&str>, None, None, None],
        "Embarked" => ["Q", "Q", "S", "S"],
    }
    .unwrap()
}

/// Ground-truth labels for [`create_titanic_test`], deliberately in a different order
pub fn create_titanic_truth() -> DataFrame {
    df! {
        "PassengerId" => [895i64, 894, 893, 892],
        "Survived" => [0i64, 0, 1, 0],
    }
    .unwrap()
}

/// The four-row toy training table
pub fn create_toy_train() -> DataFrame {
    df! {
        "PassengerId" => [1i64, 2, 3, 4],
        "Survived" => [0i64, 1, 0, 1],
        "Age" => [Some(22.0f64), None, Some(35.0), Some(28.0)],
        "Sex" => ["male", "female", "male", "female"],
    }
    .unwrap()
}

/// Write a DataFrame to a CSV file inside `dir`
pub fn write_csv(dir: &Path, name: &str, df: &mut DataFrame) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    CsvWriter::new(&mut file).include_header(true).finish(df).unwrap();
    path
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = write_csv(temp_dir.path(), "test_data.csv", df);
    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Column names of a DataFrame as owned strings
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

/// Read a column as `f64` values, panicking on nulls
pub fn f64_values(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols = column_names(df);
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
