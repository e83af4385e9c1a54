//! Schema of the custom type config document
//!
//! - `client` - optional API credentials, overridable from the environment
//! - `whitelist` - default key filter for the deletion sweep
//! - `types` - the custom types to reconcile, keyed by type key

pub mod config;
pub mod types;

pub use config::{ClientSettings, SyncConfig};
pub use types::{FieldConfig, FieldKind, FieldTypeConfig, TypeConfig};
