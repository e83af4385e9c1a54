//! Configuration for ctsync.
//!
//! Loads the custom type document (YAML, JSON, or TOML), validates it, and
//! normalizes it into the [`DesiredType`](ctsync_core::DesiredType) values the
//! reconciler consumes.

pub mod error;
pub mod loader;
pub mod ordered;
pub mod resource;
pub mod schema;
pub mod validation;

pub use error::{Error, Result};
pub use loader::{ConfigFormat, ConfigLoader};
pub use ordered::OrderedMap;
pub use resource::ResourceTypeId;
pub use schema::{ClientSettings, FieldConfig, FieldKind, FieldTypeConfig, SyncConfig, TypeConfig};
pub use validation::{Issue, Severity, ValidationReport};
