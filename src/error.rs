use crate::config::ConfigError;
use crate::http::ServerError;

/// Fatal errors raised before the server starts accepting requests.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Server(#[from] ServerError),
}
