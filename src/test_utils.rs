//! Shared helpers for tests: deterministic synthetic datasets with the required feature columns.

use crate::dataset::{Dataset, FEATURE_COLUMNS};

use ndarray::Array2;

/// Deterministic pseudo-value for row `i`, feature `j`. Distinct per-column frequencies keep
/// every column non-constant and no pair perfectly correlated.
pub(crate) fn synthetic_value(i: usize, j: usize) -> f64 {
    ((i + 1) as f64 * (j + 1) as f64 * 0.7).sin()
}

/// CSV text for a synthetic dataset of `rows` records: two text columns followed by the 14
/// required numeric columns.
pub(crate) fn synthetic_csv(rows: usize) -> String {
    let mut out = String::from("artist,song,");
    out.push_str(&FEATURE_COLUMNS.join(","));
    out.push('\n');
    for i in 0..rows {
        out.push_str(&format!("artist {i},song {i}"));
        for j in 0..FEATURE_COLUMNS.len() {
            out.push_str(&format!(",{:.6}", synthetic_value(i, j)));
        }
        out.push('\n');
    }
    out
}

/// A parsed synthetic dataset of `rows` records.
pub(crate) fn synthetic_dataset(rows: usize) -> Dataset {
    Dataset::from_reader(synthetic_csv(rows).as_bytes()).expect("synthetic dataset must parse")
}

/// A synthetic feature matrix of `rows` records without the CSV round trip.
pub(crate) fn synthetic_features(rows: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, FEATURE_COLUMNS.len()), |(i, j)| synthetic_value(i, j))
}
