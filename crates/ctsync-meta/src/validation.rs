//! Validation of the config document
//!
//! Errors block a run; warnings are logged and reported but do not.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::resource::ResourceTypeId;
use crate::schema::SyncConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One finding, located by a dotted path into the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub path: String,
    pub message: String,
}

impl Issue {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// All findings for one document, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    /// True if there are no errors; warnings are allowed
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    /// One-line description for error messages
    pub fn summary(&self) -> String {
        let count = self.errors().count();
        match self.errors().next() {
            Some(first) if count == 1 => first.to_string(),
            Some(first) => format!("{} (and {} more)", first, count - 1),
            None => "no errors".to_string(),
        }
    }
}

/// Check `config` for everything the platform would reject or we cannot
/// reconcile.
pub fn validate(config: &SyncConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if config.types.is_empty() {
        report.push(Issue::error("types", "at least one type is required"));
    }

    for (index, needle) in config.whitelist.iter().enumerate() {
        if needle.is_empty() {
            report.push(Issue::warning(
                format!("whitelist[{index}]"),
                "empty entry matches every key",
            ));
        }
    }

    for (key, type_config) in config.types.iter() {
        let at = |suffix: &str| format!("types.{key}.{suffix}");

        if key.is_empty() {
            report.push(Issue::error("types", "type keys must not be empty"));
        }
        if type_config.name.is_empty() {
            report.push(Issue::error(at("name"), "at least one translation is required"));
        }
        if type_config.description.is_empty() {
            report.push(Issue::error(
                at("description"),
                "at least one translation is required",
            ));
        }
        if type_config.resource_type_ids.is_empty() {
            report.push(Issue::error(
                at("resourceTypeIds"),
                "at least one resource type id is required",
            ));
        }
        for resource_type_id in &type_config.resource_type_ids {
            if !ResourceTypeId::is_known(resource_type_id) {
                warn!(key = %key, resource_type_id = %resource_type_id, "Unknown resource type id");
                report.push(Issue::warning(
                    at("resourceTypeIds"),
                    format!("unknown resource type id `{}`", resource_type_id),
                ));
            }
        }

        for (name, field) in type_config.field_definitions.iter() {
            if field.label.is_empty() {
                report.push(Issue::error(
                    at(&format!("fieldDefinitions.{name}.label")),
                    "at least one translation is required",
                ));
            }
            if let Err(reason) = field.field_type.resolve() {
                report.push(Issue::error(
                    at(&format!("fieldDefinitions.{name}.type")),
                    reason,
                ));
            }
        }
    }

    report
}
