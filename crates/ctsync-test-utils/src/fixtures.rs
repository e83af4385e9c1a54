//! Builders for custom type fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use ctsync_core::{
    DesiredType, FieldDefinition, FieldDefinitions, FieldType, LocalizedString, PersistedType,
};
use tempfile::TempDir;

/// An English-only localized string.
pub fn en(text: &str) -> LocalizedString {
    LocalizedString::from_pairs([("en", text)])
}

/// A localized string from `(language, text)` pairs.
pub fn localized(pairs: &[(&str, &str)]) -> LocalizedString {
    LocalizedString::from_pairs(pairs.iter().copied())
}

/// A field of the given kind, labelled with its own name in English.
pub fn field(name: &str, field_type: FieldType) -> FieldDefinition {
    FieldDefinition::new(name, field_type).with_label(en(name))
}

/// A `String` field labelled with its own name in English.
pub fn string_field(name: &str) -> FieldDefinition {
    field(name, FieldType::String)
}

/// A desired type attached to orders with one `String` field per name.
pub fn desired_type(key: &str, fields: &[&str]) -> DesiredType {
    desired_type_with(key, fields.iter().map(|n| string_field(n)).collect())
}

/// A desired type attached to orders with the given fields.
pub fn desired_type_with(key: &str, fields: Vec<FieldDefinition>) -> DesiredType {
    DesiredType {
        key: key.to_string(),
        name: en(key),
        description: en(&format!("{key} description")),
        resource_type_ids: vec!["order".to_string()],
        field_definitions: fields,
    }
}

/// The persisted mirror of `desired` at `version`.
pub fn persisted_from(desired: &DesiredType, version: u64) -> PersistedType {
    PersistedType {
        id: format!("id-{}", desired.key),
        version,
        key: desired.key.clone(),
        name: desired.name.clone(),
        description: desired.description.clone(),
        resource_type_ids: desired.resource_type_ids.clone(),
        field_definitions: FieldDefinitions::new(desired.field_definitions.clone()),
    }
}

/// A persisted type with one `String` field per name.
pub fn persisted_type(key: &str, fields: &[&str], version: u64) -> PersistedType {
    persisted_from(&desired_type(key, fields), version)
}

/// A temporary directory holding config files.
///
/// # Example
///
/// ```rust,no_run
/// use ctsync_test_utils::fixtures::ConfigDir;
///
/// let dir = ConfigDir::new();
/// let path = dir.write("ctsync.yaml", "types: {}\n");
/// assert!(path.exists());
/// ```
pub struct ConfigDir {
    temp_dir: TempDir,
}

impl Default for ConfigDir {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `name` and return the full path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {}", path.display(), e));
        path
    }
}

/// A small but complete YAML config with two types.
pub const SAMPLE_CONFIG_YAML: &str = r#"
whitelist:
  - order-
types:
  order-note:
    name:
      en: Order note
      de: Bestellnotiz
    description:
      en: Free-form notes attached to orders
    resourceTypeIds:
      - order
    fieldDefinitions:
      comment:
        type:
          name: String
        required: false
        inputHint: MultiLine
        label:
          en: Comment
          de: Kommentar
      priority:
        type:
          name: Enum
          values:
            low: Low
            high: High
        required: true
        inputHint: SingleLine
        label:
          en: Priority
  customer-flags:
    name:
      en: Customer flags
    description:
      en: Flags on customers
    resourceTypeIds:
      - customer
      - order
    fieldDefinitions:
      vip:
        type:
          name: Boolean
        inputHint: SingleLine
        label:
          en: VIP
"#;
