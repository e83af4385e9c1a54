//! Error types for ctsync-core

use crate::store::StoreError;

/// Result type for ctsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a reconciliation run
///
/// Per-type request failures are not errors; they are recorded in the
/// [`ReconcileReport`](crate::ReconcileReport).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The persisted types could not be loaded
    #[error("Failed to load persisted types: {0}")]
    Query(#[source] StoreError),

    /// The store became unreachable while processing a type
    #[error("Aborted while processing {key}: {source}")]
    Transport {
        key: String,
        #[source]
        source: StoreError,
    },

    /// The whitelist pattern is not a valid regular expression
    #[error("Invalid whitelist pattern '{pattern}': {reason}")]
    InvalidFilter { pattern: String, reason: String },
}
