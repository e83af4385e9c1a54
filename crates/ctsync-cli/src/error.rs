//! Error types for ctsync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from ctsync-core
    #[error(transparent)]
    Core(#[from] ctsync_core::Error),

    /// Error from ctsync-meta
    #[error(transparent)]
    Meta(#[from] ctsync_meta::Error),

    /// Error from ctsync-client
    #[error(transparent)]
    Client(#[from] ctsync_client::ClientError),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
