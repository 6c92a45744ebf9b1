//! Benchmark for feature preparation and logistic regression training
//!
//! Run with: cargo bench --bench pipeline_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use leakless::pipeline::{
    BinaryClassifier, FitStatistics, LogisticRegression, PipelineConfig,
};

/// Generate a synthetic passenger table with Titanic-like column kinds
fn generate_passengers(n_rows: usize, n_numeric: usize, seed: u64) -> (DataFrame, Vec<u8>) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let ports = ["C", "Q", "S"];

    let sex: Vec<&str> = (0..n_rows)
        .map(|_| if rng.gen::<bool>() { "female" } else { "male" })
        .collect();
    let embarked: Vec<Option<&str>> = (0..n_rows)
        .map(|_| {
            if rng.gen::<f64>() < 0.02 {
                None
            } else {
                Some(ports[rng.gen_range(0..ports.len())])
            }
        })
        .collect();
    let names: Vec<String> = (0..n_rows).map(|i| format!("Passenger {}", i)).collect();

    let mut columns: Vec<Column> = vec![
        Column::new("Sex".into(), &sex),
        Column::new("Embarked".into(), embarked),
        Column::new("Name".into(), names),
    ];

    for i in 0..n_numeric {
        // Roughly 20% missing, like Age
        let values: Vec<Option<f64>> = (0..n_rows)
            .map(|_| {
                if rng.gen::<f64>() < 0.2 {
                    None
                } else {
                    Some(rng.gen::<f64>() * 80.0)
                }
            })
            .collect();
        columns.push(Column::new(format!("numeric_{}", i).into(), values));
    }

    let labels: Vec<u8> = sex
        .iter()
        .map(|s| {
            let p = if *s == "female" { 0.75 } else { 0.2 };
            u8::from(rng.gen::<f64>() < p)
        })
        .collect();

    (DataFrame::new(columns).expect("Failed to create DataFrame"), labels)
}

/// Benchmark fitting and applying the preparation statistics
fn benchmark_prepare_by_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare_by_rows");
    group.sample_size(20);

    let config = PipelineConfig::default();
    let row_counts = [1_000, 10_000, 100_000];

    for n_rows in row_counts {
        let (df, _) = generate_passengers(n_rows, 10, 42);

        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::new("fit", n_rows), &df, |b, df| {
            b.iter(|| {
                let _ = FitStatistics::fit(black_box(df), black_box(&config));
            });
        });

        let (statistics, _) = FitStatistics::fit(&df, &config).expect("fit failed");
        group.bench_with_input(BenchmarkId::new("transform", n_rows), &df, |b, df| {
            b.iter(|| {
                let _ = statistics.transform(black_box(df));
            });
        });
    }

    group.finish();
}

/// Benchmark the Newton solver for varying feature counts
fn benchmark_training_by_features(c: &mut Criterion) {
    let mut group = c.benchmark_group("training_by_features");
    group.sample_size(20);

    let config = PipelineConfig::default();
    let n_rows = 10_000;
    let feature_counts = [5, 20, 50];

    for n_numeric in feature_counts {
        let (df, labels) = generate_passengers(n_rows, n_numeric, 7);
        let (_, features) = FitStatistics::fit(&df, &config).expect("fit failed");
        let matrix = features.to_matrix().expect("matrix conversion failed");
        let classifier = LogisticRegression::from_config(&config.model);

        group.bench_with_input(
            BenchmarkId::new("logistic_newton", features.width()),
            &(&matrix, &labels),
            |b, (matrix, labels)| {
                b.iter(|| {
                    let _ = classifier.fit(black_box(*matrix), black_box(*labels));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_prepare_by_rows,
    benchmark_training_by_features
);
criterion_main!(benches);
