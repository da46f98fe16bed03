//! Shared application state.

use crate::analysis::{self, Analytics};
use crate::cli::CommandLineArgs;
use crate::dataset::Dataset;
use crate::error::SoundscapeError;
use crate::mds::MdsConfig;
use crate::models::DataPayload;

use std::sync::Arc;

use axum::body::Bytes;

/// Immutable state computed once at startup and shared by every request handler.
///
/// Handlers only read from this; no locking is needed.
pub struct AppState {
    /// Command line arguments.
    pub args: CommandLineArgs,

    /// The loaded dataset.
    pub dataset: Dataset,

    /// Derived numeric artifacts.
    pub analytics: Analytics,

    /// The `/api/data` response document, serialised once.
    pub payload: Bytes,
}

impl AppState {
    /// Load the dataset, run the analysis pipeline and cache the response payload.
    ///
    /// Any failure here must abort startup; a partial payload is worse than no service.
    pub fn new(args: &CommandLineArgs) -> Result<Self, SoundscapeError> {
        let dataset = Dataset::from_path(&args.dataset)?;
        let mds_config = MdsConfig {
            max_iter: args.mds_max_iter,
            eps: args.mds_eps,
        };
        let analytics = analysis::analyze(&dataset, &mds_config, args.mds_strict)?;
        let payload = DataPayload::new(&dataset, &analytics).to_bytes()?;
        Ok(Self {
            args: args.clone(),
            dataset,
            analytics,
            payload,
        })
    }

    /// Build state from preloaded parts. Used by tests to avoid the filesystem.
    pub fn from_parts(
        args: CommandLineArgs,
        dataset: Dataset,
        analytics: Analytics,
    ) -> Result<Self, SoundscapeError> {
        let payload = DataPayload::new(&dataset, &analytics).to_bytes()?;
        Ok(Self {
            args,
            dataset,
            analytics,
            payload,
        })
    }
}

/// AppState wrapped in an Atomic Reference Count (Arc) to allow multiple references.
pub type SharedAppState = Arc<AppState>;
