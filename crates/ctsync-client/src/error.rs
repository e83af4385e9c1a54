//! Error types for ctsync-client

use ctsync_core::StoreError;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Failures outside a single type request
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Client configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Without a token or a connection no request can succeed, so both abort
/// the run.
impl From<ClientError> for StoreError {
    fn from(error: ClientError) -> Self {
        StoreError::transport(error.to_string())
    }
}
