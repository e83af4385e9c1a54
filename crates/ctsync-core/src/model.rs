//! Type definition model
//!
//! Value objects for the desired state (derived from configuration) and the
//! persisted state (fetched from the remote store). Both serialize in the
//! remote API's JSON shape, so a [`DesiredType`] doubles as the create draft.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Mapping from language tag to localized text.
///
/// Backed by a sorted map, so equality ignores the order in which the
/// language entries were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedString(BTreeMap<String, String>);

impl LocalizedString {
    /// Create an empty localized string
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(language, text)` pairs
    pub fn from_pairs<L, T>(pairs: impl IntoIterator<Item = (L, T)>) -> Self
    where
        L: Into<String>,
        T: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(lang, text)| (lang.into(), text.into()))
                .collect(),
        )
    }

    /// Text for a language tag
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    /// Insert or replace the text for a language tag
    pub fn insert(&mut self, lang: impl Into<String>, text: impl Into<String>) {
        self.0.insert(lang.into(), text.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(language, text)` pairs in language order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, t)| (l.as_str(), t.as_str()))
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for LocalizedString {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl fmt::Display for LocalizedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(l, t)| format!("{l}: {t}")).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// One allowed value of an enum field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub key: String,
    pub label: String,
}

impl EnumValue {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// The value kind of a field definition, tagged by `name` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum FieldType {
    Boolean,
    String,
    LocalizedString,
    Enum {
        values: Vec<EnumValue>,
    },
    Number,
    Money,
    Date,
    Time,
    DateTime,
    Set {
        #[serde(rename = "elementType")]
        element_type: Box<FieldType>,
    },
    Reference {
        #[serde(rename = "referenceTypeId")]
        reference_type_id: String,
    },
    /// A kind this tool does not manage. Only ever produced when reading
    /// persisted types; it is compared by field name like any other kind.
    #[serde(other)]
    Unsupported,
}

impl FieldType {
    /// The wire name of this kind
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Boolean => "Boolean",
            FieldType::String => "String",
            FieldType::LocalizedString => "LocalizedString",
            FieldType::Enum { .. } => "Enum",
            FieldType::Number => "Number",
            FieldType::Money => "Money",
            FieldType::Date => "Date",
            FieldType::Time => "Time",
            FieldType::DateTime => "DateTime",
            FieldType::Set { .. } => "Set",
            FieldType::Reference { .. } => "Reference",
            FieldType::Unsupported => "Unsupported",
        }
    }
}

/// Rendering hint for text fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputHint {
    MultiLine,
    #[default]
    SingleLine,
}

/// A single custom field of a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub input_hint: InputHint,
    #[serde(default)]
    pub label: LocalizedString,
}

impl FieldDefinition {
    /// Create an optional single-line field with an empty label
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            input_hint: InputHint::SingleLine,
            label: LocalizedString::new(),
        }
    }

    pub fn with_label(mut self, label: LocalizedString) -> Self {
        self.label = label;
        self
    }

    pub fn with_input_hint(mut self, input_hint: InputHint) -> Self {
        self.input_hint = input_hint;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// The configuration-declared target shape of a custom type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesiredType {
    pub key: String,
    pub name: LocalizedString,
    pub description: LocalizedString,
    pub resource_type_ids: Vec<String>,
    pub field_definitions: Vec<FieldDefinition>,
}

impl DesiredType {
    /// Names of the field definitions in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        self.field_definitions
            .iter()
            .map(|f| f.name.as_str())
            .collect()
    }
}

/// Field definitions of a persisted type, addressable by name and position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldDefinitions(Vec<FieldDefinition>);

impl FieldDefinitions {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self(fields)
    }

    /// Look up a field by name
    pub fn get_by_name(&self, name: &str) -> Option<&FieldDefinition> {
        self.0.iter().find(|f| f.name == name)
    }

    /// Look up a field by position
    pub fn get_at(&self, index: usize) -> Option<&FieldDefinition> {
        self.0.get(index)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_by_name(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDefinition> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<FieldDefinition>> for FieldDefinitions {
    fn from(fields: Vec<FieldDefinition>) -> Self {
        Self(fields)
    }
}

impl<'a> IntoIterator for &'a FieldDefinitions {
    type Item = &'a FieldDefinition;
    type IntoIter = std::slice::Iter<'a, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The remote store's current version of a custom type
///
/// Owned by the remote store. The `version` must accompany every update or
/// delete so that stale writes are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedType {
    #[serde(default)]
    pub id: String,
    pub version: u64,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: LocalizedString,
    #[serde(default)]
    pub description: LocalizedString,
    #[serde(default)]
    pub resource_type_ids: Vec<String>,
    #[serde(default)]
    pub field_definitions: FieldDefinitions,
}
