//! Error handling.

use thiserror::Error;

/// Soundscape server error type
///
/// This type encapsulates the various errors that may occur while building the cached
/// application state. All of them are startup-time failures: the server refuses to start
/// rather than serve a partial or inconsistent payload.
#[derive(Debug, Error)]
pub enum SoundscapeError {
    /// Error opening or reading the dataset file
    #[error("failed to read dataset from {path}")]
    DatasetRead {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Error parsing a row of the dataset
    #[error("failed to parse dataset")]
    DatasetParse(#[from] csv::Error),

    /// The dataset header lacks one or more required numeric columns
    #[error("dataset is missing required numeric columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// A required numeric cell is empty or not a number
    #[error("invalid numeric value {value:?} in column {column}, row {row}")]
    InvalidNumeric {
        column: String,
        row: usize,
        value: String,
    },

    /// The dataset parsed but contains no data rows
    #[error("dataset contains no data rows")]
    EmptyDataset,

    /// A feature column with zero variance cannot be standardized by division
    #[error("feature column {column} has zero variance and cannot be standardized")]
    DegenerateColumn { column: usize },

    /// Fewer feature columns than requested principal components
    #[error("cannot retain {requested} components from {features} features")]
    InsufficientDimensions { features: usize, requested: usize },

    /// The covariance matrix carries no variance at all
    #[error("covariance matrix has no positive eigenvalues")]
    ZeroTotalVariance,

    /// A dissimilarity matrix input was not square
    #[error("distance matrix must be square, got {rows}x{cols}")]
    DistanceMatrixShape { rows: usize, cols: usize },

    /// The MDS optimizer hit its iteration cap in strict mode
    #[error("MDS did not reach tolerance within {iterations} iterations (stress {stress})")]
    MdsDidNotConverge { iterations: usize, stress: f64 },

    /// An empty matrix reached a statistics routine
    #[error("cannot compute statistics over empty input")]
    EmptyInput(#[from] ndarray_stats::errors::EmptyInput),

    /// Error serialising the cached payload
    #[error("failed to serialise data payload")]
    PayloadSerialization(#[from] serde_json::Error),
}
