//! Per-request logging.
//!
//! Wraps every registered route. The record is emitted only after the inner
//! handler has produced its response, so `duration` covers the whole handling
//! time including any sleep.

use axum::{
    extract::{MatchedPath, OriginalUri, Request},
    middleware::Next,
    response::Response,
};
use tokio::time::Instant;

use crate::http::acme::CHALLENGE_PREFIX;
use crate::observability::metrics;

pub async fn log_request(request: Request, next: Next) -> Response {
    let start = Instant::now();

    // The router may have stripped a prefix already; log what the client sent.
    let uri = request
        .extensions()
        .get::<OriginalUri>()
        .map(|original| original.0.clone())
        .unwrap_or_else(|| request.uri().clone());
    let uri = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| route_label(matched.as_str()).to_string())
        .unwrap_or_else(|| metrics::UNMATCHED_ROUTE.to_string());

    let response = next.run(request).await;
    let elapsed = start.elapsed();

    metrics::record_request(method.as_str(), &route, response.status().as_u16(), elapsed);
    tracing::info!(
        uri = %uri,
        method = %method,
        duration = elapsed.as_secs_f64(),
        "processing request"
    );

    response
}

/// Collapse the nested challenge pattern to its prefix.
fn route_label(matched: &str) -> &str {
    if matched.starts_with(CHALLENGE_PREFIX) {
        CHALLENGE_PREFIX
    } else {
        matched
    }
}
