//! HTTP server startup logic.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Bind the listening socket. Failing here is fatal and never retried.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serve `app` on an already bound listener.
///
/// Runs until the process is terminated; there is no graceful shutdown path.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), ServerError> {
    match listener.local_addr() {
        Ok(addr) => tracing::info!(%addr, "Starting HTTP server"),
        Err(e) => tracing::warn!(error = %e, "Starting HTTP server on unknown address"),
    }

    axum::serve(listener, app).await.map_err(ServerError::Serve)
}

/// Bind `addr` and serve `app` on it.
pub async fn start_server(app: Router, addr: SocketAddr) -> Result<(), ServerError> {
    let listener = bind(addr).await?;
    serve(listener, app).await
}
