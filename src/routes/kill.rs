use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// Terminate the process with the configured exit code. Never responds.
pub async fn kill(State(state): State<AppState>) -> StatusCode {
    state.kill.trigger()
}
