//! Request ID middleware for correlating logs with requests.
//!
//! Every request gets a UUID v4 and a tracing span covering its whole
//! lifecycle. The ID is echoed back in the `x-request-id` response header.
//! Probe traffic (`/healthz`) is polled constantly by the orchestrator, so its
//! completion events are logged at debug level instead of info.

use std::time::Instant;

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const PROBE_PATH: &str = "/healthz";

/// Middleware that generates a request ID and creates a request span.
///
/// Should be the outermost layer so the span wraps all request processing.
pub async fn request_id_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let is_probe = path == PROBE_PATH;

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();

        tracing::Span::current().record("duration_ms", duration_ms);
        if is_probe {
            tracing::debug!(status, duration_ms, "Request completed");
        } else {
            tracing::info!(status, duration_ms, "Request completed");
        }

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}
