//! This crate provides the Soundscape server. It serves a static music metadata dataset together
//! with two derived dimensionality reduction projections over an HTTP API, for consumption by a
//! front-end visualization page.
//!
//! All numeric work happens exactly once, at process startup: the dataset is loaded, its numeric
//! features are standardized, a principal component decomposition yields the explained variance
//! profile, and an absolute-correlation distance matrix between features is embedded into the
//! plane by multidimensional scaling. Every request then serves the same cached payload.
//!
//! The server is built on top of a number of open source components.
//!
//! * [Tokio](tokio), the most popular asynchronous Rust runtime.
//! * [Axum](axum) web framework, built by the Tokio team on top of the [hyper](https://hyper.rs)
//!   HTTP library.
//! * [Serde](serde) performs serialisation of the JSON response data.
//! * [csv](csv) reads the delimited dataset file.
//! * [ndarray] provides [NumPy](https://numpy.org)-like n-dimensional arrays used in numerical
//!   computation, with [ndarray-stats](ndarray_stats) supplying covariance and correlation.
//! * [nalgebra] provides the symmetric eigendecomposition behind the principal component and
//!   classical scaling steps.

pub mod analysis;
pub mod app;
pub mod app_state;
pub mod cli;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod mds;
pub mod metrics;
pub mod models;
pub mod pca;
pub mod server;
pub mod standardize;
#[cfg(test)]
pub mod test_utils;
pub mod tracing;
