//! Route handlers.
//!
//! Bodies end in a newline, matching what line-oriented probes expect.

use axum::{extract::State, http::StatusCode};

use crate::http::server::AppState;

pub const HEALTH_BODY: &str = "OK\n";
pub const SNORE_BODY: &str = "*snore*\n";
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// `/health`: always 200.
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, HEALTH_BODY)
}

/// `/randomsleep`: park this request's task for a random delay, then 200.
///
/// Only the calling task sleeps; other requests proceed in parallel. The
/// sleep is not cut short if the client goes away.
pub async fn random_sleep(State(state): State<AppState>) -> (StatusCode, &'static str) {
    let delay = state.delay.next_delay(&state.range);
    tokio::time::sleep(delay).await;
    (StatusCode::OK, SNORE_BODY)
}

/// Fallback for paths without a route.
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}
