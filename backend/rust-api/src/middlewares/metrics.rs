use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS};

const KNOWN_PATHS: &[&str] = &[
    "/",
    "/shuffle",
    "/feedback",
    "/health",
    "/metrics",
    "/api/v1/session",
    "/api/v1/session/shuffle",
    "/api/v1/session/answers",
];

/// Records request count and latency per route.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = route_label(req.uri().path());

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method.as_str(), path, status.as_str()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method.as_str(), path])
        .observe(duration);

    response
}

/// Maps a request path to a bounded label set so stray URLs can't blow up
/// cardinality.
fn route_label(path: &str) -> &'static str {
    let trimmed = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };
    KNOWN_PATHS
        .iter()
        .find(|known| **known == trimmed)
        .copied()
        .unwrap_or("other")
}
