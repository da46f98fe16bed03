//! Prometheus metrics for the HTTP surface.

use axum::{body::Body, http::Request, response::Response};
use lazy_static::lazy_static;
use prometheus::{self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use tracing::Span;

lazy_static! {
    // Registry for holding metric state
    pub static ref REGISTRY: Registry = Registry::new();
    // Requests received, labelled by HTTP method
    pub static ref REQUESTS: IntCounterVec = IntCounterVec::new(
        Opts::new("soundscape_requests", "The number of HTTP requests received"),
        &["http_method"]
    ).unwrap();
    // Responses sent, labelled by status code
    pub static ref RESPONSES: IntCounterVec = IntCounterVec::new(
        Opts::new("soundscape_responses", "The number of HTTP responses sent"),
        &["status_code"]
    ).unwrap();
    // Response latency histogram
    pub static ref RESPONSE_TIMES: HistogramVec = HistogramVec::new(
        HistogramOpts{
            common_opts: Opts::new("soundscape_response_time", "The time taken to respond to each request"),
            buckets: prometheus::DEFAULT_BUCKETS.to_vec(),
        },
        &[],
    ).unwrap();
}

/// Register all collectors with the registry. Call once at startup.
pub fn register_metrics() {
    REGISTRY.register(Box::new(REQUESTS.clone())).unwrap();
    REGISTRY.register(Box::new(RESPONSES.clone())).unwrap();
    REGISTRY.register(Box::new(RESPONSE_TIMES.clone())).unwrap();
}

/// Render the current metric state in Prometheus text exposition format.
pub async fn metrics_handler() -> String {
    let encoder = prometheus::TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&REGISTRY.gather(), &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Increments the request counter on all incoming requests, labelled by HTTP method
pub fn request_counter(request: &Request<Body>, _span: &Span) {
    REQUESTS
        .with_label_values(&[&request.method().to_string().to_ascii_uppercase()])
        .inc();
}

/// Increment the response counter on all outgoing responses, labelled by status code
pub fn record_response_metrics<B>(
    response: &Response<B>,
    latency: std::time::Duration,
    _span: &Span,
) {
    RESPONSES
        .with_label_values(&[response.status().as_str()])
        .inc();

    RESPONSE_TIMES
        .with_label_values(&[])
        .observe(latency.as_secs_f64());
}
