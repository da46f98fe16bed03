//! The startup analysis pipeline.
//!
//! Runs the four numeric steps exactly once, in order: standardize the feature matrix, compute
//! the explained variance profile, build the feature distance matrix and embed it into the
//! plane. The resulting [Analytics] bundle is immutable for the lifetime of the process.

use crate::dataset::{Dataset, FEATURE_COLUMNS};
use crate::distance;
use crate::error::SoundscapeError;
use crate::mds::{self, Embedding, MdsConfig};
use crate::pca;
use crate::standardize;

use ndarray::Array2;
use tracing::{event, Level};

/// Derived artifacts computed once at startup.
#[derive(Debug)]
pub struct Analytics {
    /// Explained variance ratio of the retained principal components, descending.
    pub explained_variance: Vec<f64>,

    /// Feature distance matrix, `1 - |correlation|`.
    pub distances: Array2<f64>,

    /// Planar embedding of the feature distance matrix.
    pub embedding: Embedding,
}

/// Run the full analysis pipeline over a loaded dataset.
///
/// With `mds_strict` set, an embedding that fails to reach tolerance within the iteration cap
/// aborts startup; otherwise the best-effort embedding is served and a warning logged.
pub fn analyze(
    dataset: &Dataset,
    mds_config: &MdsConfig,
    mds_strict: bool,
) -> Result<Analytics, SoundscapeError> {
    event!(
        Level::INFO,
        rows = dataset.len(),
        features = FEATURE_COLUMNS.len(),
        "standardizing feature matrix"
    );
    let standardized = standardize::standardize(dataset.features()).map_err(|error| {
        if let SoundscapeError::DegenerateColumn { column } = &error {
            event!(
                Level::ERROR,
                column = FEATURE_COLUMNS[*column],
                "constant feature column"
            );
        }
        error
    })?;

    let explained_variance =
        pca::explained_variance_ratio(&standardized, pca::RETAINED_COMPONENTS)?;
    event!(
        Level::INFO,
        components = pca::RETAINED_COMPONENTS,
        captured = explained_variance.iter().sum::<f64>(),
        "computed explained variance profile"
    );

    let distances = distance::correlation_distances(&standardized)?;
    let embedding = mds::embed(&distances, mds_config)?;
    if embedding.converged {
        event!(
            Level::INFO,
            iterations = embedding.iterations,
            stress = embedding.stress,
            "MDS embedding converged"
        );
    } else if mds_strict {
        return Err(SoundscapeError::MdsDidNotConverge {
            iterations: embedding.iterations,
            stress: embedding.stress,
        });
    } else {
        event!(
            Level::WARN,
            iterations = embedding.iterations,
            stress = embedding.stress,
            "MDS embedding did not converge, serving best-effort coordinates"
        );
    }

    Ok(Analytics {
        explained_variance,
        distances,
        embedding,
    })
}
