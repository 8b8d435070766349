use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};

/// Request observability middleware: one span per request plus a completion
/// line carrying route, status and latency.
pub async fn request_observability(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str())
        .unwrap_or("unknown")
        .to_string();

    let span = info_span!(
        "http_request",
        method = %method,
        route = %route,
    );

    let start = Instant::now();
    let response = next.run(request).instrument(span).await;
    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    info!(
        method = %method,
        route = %route,
        status,
        latency_ms,
        "request completed"
    );

    response
}
