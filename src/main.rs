//! This file defines the soundscape binary entry point.

use soundscape::app;
use soundscape::app_state::AppState;
use soundscape::cli;
use soundscape::metrics;
use soundscape::server;
use soundscape::tracing::init_tracing;

use std::error::Error;
use std::process::exit;
use std::sync::Arc;

use tracing::{event, Level};

/// Application entry point
#[tokio::main]
async fn main() {
    let args = cli::parse();
    init_tracing();
    metrics::register_metrics();
    // All numeric work happens here, before the listener binds. Any failure is fatal.
    let state = match AppState::new(&args) {
        Ok(state) => Arc::new(state),
        Err(error) => {
            event!(Level::ERROR, "failed to build application state: {}", error);
            let mut current = error.source();
            while let Some(source) = current {
                event!(Level::ERROR, "caused by: {}", source);
                current = source.source();
            }
            exit(1)
        }
    };
    let service = app::service(state);
    server::serve(&args, service).await;
}
