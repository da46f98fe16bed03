//! HTTP route registration and handlers.

use crate::app_state::SharedAppState;
use crate::metrics;
use crate::models;

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use tower::ServiceBuilder;
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

/// The visualization front-end page, embedded at compile time.
static INDEX_HTML: &str = include_str!("../static/index.html");

/// The Soundscape service, with trailing slashes normalised away.
pub type Service = NormalizePath<Router>;

impl IntoResponse for models::CachedJson {
    fn into_response(self) -> Response {
        (
            [(&header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string())],
            self.0,
        )
            .into_response()
    }
}

/// Returns the full service ready to be served.
pub fn service(state: SharedAppState) -> Service {
    NormalizePath::trim_trailing_slash(router(state))
}

/// Returns the application router.
pub fn router(state: SharedAppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/data", get(api_data))
        .route("/metrics", get(metrics::metrics_handler))
        .layer(
            ServiceBuilder::new().layer(
                TraceLayer::new_for_http()
                    .on_request(metrics::request_counter)
                    .on_response(metrics::record_response_metrics),
            ),
        )
        .with_state(state)
}

/// Serve the visualization page.
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Serve the combined data document cached at startup. Every request receives the identical
/// payload until process restart.
async fn api_data(State(state): State<SharedAppState>) -> models::CachedJson {
    models::CachedJson(state.payload.clone())
}
