//! Shared test utilities for the ctsync workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not
//! each rebuild the same types. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: builders for desired and persisted custom types
//! - [`store`]: [`MemoryStore`], an in-memory [`RemoteStore`](ctsync_core::RemoteStore)
//!   that records every request

pub mod fixtures;
pub mod store;

pub use store::{MemoryStore, Request};
