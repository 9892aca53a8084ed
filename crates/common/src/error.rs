//! Unified error type for the number-window service.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid number id: {0}")]
    InvalidCategory(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),
}

impl Error {
    /// True for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidCategory(_) | Error::InvalidInput(_))
    }
}
