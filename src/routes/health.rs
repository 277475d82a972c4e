//! Readiness probe and its manual overrides.
//!
//! `/healthz` is what the orchestrator polls. `/damage` and `/heal` flip the
//! flag by hand to simulate failure and recovery.

use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// Health check handler.
///
/// Returns 200 when ready, 500 otherwise. The body is always empty.
pub async fn healthz(State(state): State<AppState>) -> StatusCode {
    if state.health.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Make the server report itself as unhealthy.
pub async fn damage(State(state): State<AppState>) -> StatusCode {
    state.health.damage();
    StatusCode::OK
}

/// Make the server report itself as healthy.
pub async fn heal(State(state): State<AppState>) -> StatusCode {
    state.health.heal();
    StatusCode::OK
}
