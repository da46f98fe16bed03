//! Feature standardization.
//!
//! Rescales each feature column to zero mean and unit variance using the population standard
//! deviation (ddof = 0). The same convention is assumed by the covariance and correlation steps
//! downstream.

use crate::error::SoundscapeError;

use ndarray::{Array2, Axis};

/// Standard deviations at or below this threshold are treated as zero.
const VARIANCE_FLOOR: f64 = 1e-12;

/// Return a standardized copy of the feature matrix.
///
/// Each column independently has mean 0 and unit variance afterwards, computed from this matrix
/// only. A constant column cannot be standardized by division and is rejected with
/// [SoundscapeError::DegenerateColumn] carrying the offending column index.
pub fn standardize(features: &Array2<f64>) -> Result<Array2<f64>, SoundscapeError> {
    let mean = features
        .mean_axis(Axis(0))
        .ok_or(SoundscapeError::EmptyDataset)?;
    let std = features.std_axis(Axis(0), 0.0);
    if let Some(column) = std.iter().position(|sigma| *sigma <= VARIANCE_FLOOR) {
        return Err(SoundscapeError::DegenerateColumn { column });
    }

    let mut standardized = features.clone();
    standardized -= &mean;
    standardized /= &std;
    Ok(standardized)
}
