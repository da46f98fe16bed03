//! Principal component analysis.
//!
//! Computes the explained variance profile of the standardized feature matrix: the population
//! covariance structure is eigendecomposed and each retained component's eigenvalue is reported
//! as a fraction of the total variance across all components.

use crate::error::SoundscapeError;

use std::cmp::Ordering;

use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::Array2;
use ndarray_stats::CorrelationExt;

/// Number of principal components retained for the API payload.
pub const RETAINED_COMPONENTS: usize = 10;

/// Return the explained variance ratio of the top `n_components` principal components,
/// in descending order.
///
/// Ratios are each eigenvalue divided by the sum of ALL eigenvalues, so the result sums to at
/// most 1. Ties keep the eigensolver's output order (the sort is stable). Eigenvalues that come
/// out marginally negative through floating point error are clamped to zero.
pub fn explained_variance_ratio(
    standardized: &Array2<f64>,
    n_components: usize,
) -> Result<Vec<f64>, SoundscapeError> {
    let features = standardized.ncols();
    if features < n_components {
        return Err(SoundscapeError::InsufficientDimensions {
            features,
            requested: n_components,
        });
    }

    // ndarray-stats expects rows to be the random variables. ddof 0 matches the standardizer.
    let covariance = standardized.t().cov(0.0)?;
    let covariance = DMatrix::from_fn(features, features, |i, j| covariance[[i, j]]);
    let eigen = SymmetricEigen::new(covariance);

    let mut eigenvalues: Vec<f64> = eigen.eigenvalues.iter().map(|l| l.max(0.0)).collect();
    eigenvalues.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    let total: f64 = eigenvalues.iter().sum();
    if total <= 0.0 {
        return Err(SoundscapeError::ZeroTotalVariance);
    }

    Ok(eigenvalues
        .iter()
        .take(n_components)
        .map(|eigenvalue| eigenvalue / total)
        .collect())
}
