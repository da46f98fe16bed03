//! Data types for the API payload.

use crate::analysis::Analytics;
use crate::dataset::{Dataset, Row};
use crate::error::SoundscapeError;

use axum::body::Bytes;
use serde::Serialize;

/// The combined JSON document served by `GET /api/data`.
#[derive(Debug, Serialize)]
pub struct DataPayload {
    /// All dataset rows, in original row order, each as a field-named mapping.
    pub songs: Vec<Row>,

    /// Explained variance ratio of the retained principal components, descending.
    pub pca_explained: Vec<f64>,

    /// One `[x, y]` pair per feature column, in feature column order.
    pub mds_coords: Vec<[f64; 2]>,
}

impl DataPayload {
    /// Assemble the payload from the loaded dataset and its derived analytics.
    pub fn new(dataset: &Dataset, analytics: &Analytics) -> Self {
        Self {
            songs: dataset.rows().to_vec(),
            pca_explained: analytics.explained_variance.clone(),
            mds_coords: analytics.embedding.coords.clone(),
        }
    }

    /// Serialise the payload once, for caching as a shared response body.
    pub fn to_bytes(&self) -> Result<Bytes, SoundscapeError> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }
}

/// A cached, pre-serialised JSON response body.
#[derive(Clone, Debug)]
pub struct CachedJson(pub Bytes);
