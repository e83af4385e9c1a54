//! Remote store capability
//!
//! The reconciler talks to the platform only through [`RemoteStore`]. The
//! error type separates failures that are recorded per type from failures
//! that abort the whole run.

use async_trait::async_trait;

use crate::actions::ChangeAction;
use crate::model::{DesiredType, PersistedType};

/// A structured error response from the remote store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({correlation_id})")]
pub struct RemoteError {
    /// Human-readable message returned by the store
    pub message: String,
    /// Identifier the store assigned to the failed request
    pub correlation_id: String,
}

impl RemoteError {
    pub fn new(message: impl Into<String>, correlation_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            correlation_id: correlation_id.into(),
        }
    }
}

/// Errors returned by a [`RemoteStore`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store answered with a structured error envelope
    #[error(transparent)]
    Remote(RemoteError),

    /// The store answered, but with neither a success nor a structured error
    #[error("Unexpected response: {reason}")]
    Unexpected { reason: String },

    /// The store could not be reached
    #[error("Remote store unreachable: {reason}")]
    Transport { reason: String },
}

impl StoreError {
    pub fn unexpected(reason: impl Into<String>) -> Self {
        Self::Unexpected {
            reason: reason.into(),
        }
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// True if this error should abort the run instead of being recorded
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::Transport { .. })
    }
}

impl From<RemoteError> for StoreError {
    fn from(error: RemoteError) -> Self {
        StoreError::Remote(error)
    }
}

/// Access to the persisted custom types of one project
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch every persisted type
    async fn query(&self) -> Result<Vec<PersistedType>, StoreError>;

    /// Create a type from its full desired payload
    async fn create(&self, draft: &DesiredType) -> Result<PersistedType, StoreError>;

    /// Apply one atomic batch of actions to the type with `key`
    async fn update(
        &self,
        key: &str,
        version: u64,
        actions: &[ChangeAction],
    ) -> Result<PersistedType, StoreError>;

    /// Delete the type with `key`
    async fn delete(&self, key: &str, version: u64) -> Result<(), StoreError>;
}

/// Lets several runs share one store.
#[async_trait]
impl<'a, S: RemoteStore + ?Sized> RemoteStore for &'a S {
    async fn query(&self) -> Result<Vec<PersistedType>, StoreError> {
        (**self).query().await
    }

    async fn create(&self, draft: &DesiredType) -> Result<PersistedType, StoreError> {
        (**self).create(draft).await
    }

    async fn update(
        &self,
        key: &str,
        version: u64,
        actions: &[ChangeAction],
    ) -> Result<PersistedType, StoreError> {
        (**self).update(key, version, actions).await
    }

    async fn delete(&self, key: &str, version: u64) -> Result<(), StoreError> {
        (**self).delete(key, version).await
    }
}
