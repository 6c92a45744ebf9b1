//! Tests for categorical encoding and text-column removal

use leakless::pipeline::{drop_text_columns, BinaryEncoding, EncodingPlan, PipelineConfig};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::{column_names, create_titanic_train, f64_values};

fn default_plan(train: &DataFrame) -> EncodingPlan {
    let config = PipelineConfig::default();
    EncodingPlan::fit(train, &config.binary_encodings, &config.indicator_columns).unwrap()
}

#[test]
fn test_binary_encoding_maps_sex() {
    let train = create_titanic_train();
    let encoded = default_plan(&train).apply(&train).unwrap();

    let sex = encoded.column("Sex").unwrap();
    assert_eq!(sex.dtype(), &DataType::Int32);
    let codes: Vec<Option<i32>> = sex.i32().unwrap().into_iter().collect();
    let expected: Vec<Option<i32>> = train
        .column("Sex")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| match v {
            Some("male") => Some(0),
            Some("female") => Some(1),
            _ => None,
        })
        .collect();
    assert_eq!(codes, expected);
    assert_eq!(sex.null_count(), 0, "no residual text values");
}

#[test]
fn test_indicator_columns_appended_after_existing() {
    let train = create_titanic_train();
    let encoded = default_plan(&train).apply(&train).unwrap();

    let names = column_names(&encoded);
    assert!(!names.contains(&"Embarked".to_string()));
    assert_eq!(&names[names.len() - 2..], &["Embarked_Q", "Embarked_S"]);

    // Rows: S, C, S, S, S, Q, S, S, null, C, S, Q
    assert_eq!(
        f64_values(&encoded, "Embarked_Q"),
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]
    );
    assert_eq!(
        f64_values(&encoded, "Embarked_S"),
        vec![1.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0]
    );
}

#[test]
fn test_reapplying_encoding_is_noop() {
    let train = create_titanic_train();
    let plan = default_plan(&train);

    let once = plan.apply(&train).unwrap();
    let twice = plan.apply(&once).unwrap();

    assert_eq!(column_names(&once), column_names(&twice));
    assert!(once.equals_missing(&twice));
}

#[test]
fn test_custom_binary_mapping() {
    let df = df! {
        "Smoker" => ["yes", "no", "YES", "no"],
    }
    .unwrap();
    let plan = EncodingPlan::fit(&df, &[BinaryEncoding::new("Smoker", "no", "yes")], &[]).unwrap();

    let encoded = plan.apply(&df).unwrap();
    let codes: Vec<Option<i32>> = encoded.column("Smoker").unwrap().i32().unwrap().into_iter().collect();

    // Mapping is exact: differently-cased values are unknown
    assert_eq!(codes, vec![Some(1), Some(0), None, Some(0)]);
}

#[test]
fn test_drop_text_columns_ignores_absent() {
    let train = create_titanic_train();
    let text: Vec<String> = ["Name", "Ticket", "Cabin", "Nickname"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let (reduced, dropped) = drop_text_columns(&train, &text);

    assert_eq!(dropped, vec!["Name", "Ticket", "Cabin"]);
    assert_eq!(reduced.width(), train.width() - 3);
    assert_eq!(reduced.height(), train.height());
}
