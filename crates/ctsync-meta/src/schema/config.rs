//! The top-level config document

use std::path::Path;

use ctsync_core::{CustomTypeCollection, DesiredType};
use serde::{Deserialize, Serialize};

use crate::loader::{ConfigFormat, ConfigLoader};
use crate::ordered::OrderedMap;
use crate::schema::types::TypeConfig;
use crate::validation::{self, Issue, ValidationReport};
use crate::{Error, Result};

/// Credentials and endpoints for the platform API
///
/// Every field is optional here; the CLI fills gaps from flags and the
/// environment before building a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSettings {
    #[serde(default)]
    pub project_key: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub auth_url: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl ClientSettings {
    /// Layer `overrides` on top of these settings; set values win.
    pub fn with_overrides(self, overrides: ClientSettings) -> Self {
        Self {
            project_key: overrides.project_key.or(self.project_key),
            client_id: overrides.client_id.or(self.client_id),
            client_secret: overrides.client_secret.or(self.client_secret),
            auth_url: overrides.auth_url.or(self.auth_url),
            api_url: overrides.api_url.or(self.api_url),
            scopes: if overrides.scopes.is_empty() {
                self.scopes
            } else {
                overrides.scopes
            },
        }
    }
}

/// The whole config document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    #[serde(default)]
    pub client: ClientSettings,
    /// Literal key substrings eligible for the deletion sweep
    #[serde(default)]
    pub whitelist: Vec<String>,
    /// Custom types keyed by type key, in document order
    #[serde(default)]
    pub types: OrderedMap<TypeConfig>,
}

impl SyncConfig {
    /// Load the document at `path`, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        ConfigLoader::new().load(path)
    }

    /// Parse an in-memory document.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        format.parse(content, Path::new("<inline>"))
    }

    pub fn validate(&self) -> ValidationReport {
        validation::validate(self)
    }

    /// Validate and normalize the configured types, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if any validation error was found.
    /// Warnings are logged and do not fail.
    pub fn desired_types(&self) -> Result<Vec<DesiredType>> {
        let report = self.validate();
        if !report.is_valid() {
            return Err(Error::Validation(report));
        }

        self.types
            .iter()
            .map(|(key, type_config)| {
                type_config.to_desired(key).map_err(|(field, reason)| {
                    let mut report = ValidationReport::default();
                    report.push(Issue::error(
                        format!("types.{key}.fieldDefinitions.{field}.type"),
                        reason,
                    ));
                    Error::Validation(report)
                })
            })
            .collect()
    }

    /// Type keys grouped by the resource they attach to
    pub fn collection(&self) -> Result<CustomTypeCollection> {
        let desired = self.desired_types()?;
        Ok(CustomTypeCollection::from_types(&desired))
    }
}
