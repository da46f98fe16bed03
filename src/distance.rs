//! Feature dissimilarity.
//!
//! Converts pairwise Pearson correlation between feature columns into a distance matrix:
//! `distance = 1 - |correlation|`. Strongly related features end up close together, unrelated
//! ones far apart.

use crate::error::SoundscapeError;

use ndarray::Array2;
use ndarray_stats::CorrelationExt;

/// Return the feature distance matrix of a standardized feature matrix.
///
/// The result is square over the feature columns, symmetric, has an exactly zero diagonal and
/// entries in [0, 1]. The upper triangle is mirrored onto the lower one so symmetry is exact
/// rather than merely within floating tolerance.
pub fn correlation_distances(standardized: &Array2<f64>) -> Result<Array2<f64>, SoundscapeError> {
    // ndarray-stats expects rows to be the random variables being correlated.
    let correlation = standardized.t().pearson_correlation()?;
    let mut distances = correlation.mapv(|r| (1.0 - r.abs()).clamp(0.0, 1.0));
    let n = distances.nrows();
    for i in 0..n {
        distances[[i, i]] = 0.0;
        for j in (i + 1)..n {
            distances[[j, i]] = distances[[i, j]];
        }
    }
    Ok(distances)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::standardize::standardize;
    use crate::test_utils;

    use approx::assert_abs_diff_eq;
    use ndarray::arr2;

    #[test]
    fn linearly_dependent_features_have_zero_distance() {
        let features = arr2(&[
            [1.0, 2.0, 9.0],
            [2.0, 4.0, 3.0],
            [3.0, 6.0, 7.0],
            [4.0, 8.0, 1.0],
        ]);
        let standardized = standardize(&features).unwrap();
        let distances = correlation_distances(&standardized).unwrap();
        // Column 1 is exactly 2x column 0.
        assert_abs_diff_eq!(distances[[0, 1]], 0.0, epsilon = 1e-9);
        assert!(distances[[0, 2]] > 0.0);
    }

    #[test]
    fn anti_correlation_counts_as_similarity() {
        let features = arr2(&[[1.0, -1.0], [2.0, -2.0], [3.0, -3.0]]);
        let standardized = standardize(&features).unwrap();
        let distances = correlation_distances(&standardized).unwrap();
        // |r| = 1 for perfect anti-correlation.
        assert_abs_diff_eq!(distances[[0, 1]], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn matrix_properties() {
        let standardized = standardize(&test_utils::synthetic_features(100)).unwrap();
        let distances = correlation_distances(&standardized).unwrap();
        assert_eq!((14, 14), distances.dim());
        for i in 0..14 {
            assert_eq!(0.0, distances[[i, i]]);
            for j in 0..14 {
                assert_eq!(distances[[i, j]], distances[[j, i]]);
                assert!((0.0..=1.0).contains(&distances[[i, j]]));
            }
        }
    }
}
