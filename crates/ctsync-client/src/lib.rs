//! commercetools HTTP API store for ctsync.
//!
//! [`HttpStore`] implements [`RemoteStore`](ctsync_core::RemoteStore) over the
//! project's `/types` endpoints, authenticating with an OAuth2
//! client-credentials token from [`TokenCache`].

pub mod auth;
pub mod client;
pub mod error;

pub use auth::TokenCache;
pub use client::{ClientConfig, HttpStore, DEFAULT_PAGE_SIZE};
pub use error::{ClientError, ClientResult};
