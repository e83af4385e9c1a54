//! Error types for ctsync-meta

use std::path::PathBuf;

use crate::validation::ValidationReport;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid configuration: {}", .0.summary())]
    Validation(ValidationReport),
}
