//! Custom type definitions as written in the config document
//!
//! # Example YAML
//!
//! ```yaml
//! order-note:
//!   name: { en: Order note }
//!   description: { en: Notes on orders }
//!   resourceTypeIds: [order]
//!   fieldDefinitions:
//!     priority:
//!       type: { name: Enum, values: { low: Low, high: High } }
//!       inputHint: SingleLine
//!       label: { en: Priority }
//! ```
//!
//! Type keys and field names are map keys here; [`TypeConfig::to_desired`]
//! injects them into the normalized model.

use ctsync_core::{DesiredType, EnumValue, FieldDefinition, FieldType, InputHint, LocalizedString};
use serde::{Deserialize, Serialize};

use crate::ordered::OrderedMap;

/// One custom type, keyed by its type key in `types`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TypeConfig {
    pub name: LocalizedString,
    pub description: LocalizedString,
    pub resource_type_ids: Vec<String>,
    /// Field definitions keyed by field name, in document order
    #[serde(default)]
    pub field_definitions: OrderedMap<FieldConfig>,
}

impl TypeConfig {
    /// Normalize into the reconciler's model under `key`.
    ///
    /// # Errors
    ///
    /// Returns the offending field name and reason if a field type is
    /// incomplete.
    pub fn to_desired(&self, key: &str) -> Result<DesiredType, (String, String)> {
        let field_definitions = self
            .field_definitions
            .iter()
            .map(|(name, field)| field.to_definition(name).map_err(|reason| (name.to_string(), reason)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DesiredType {
            key: key.to_string(),
            name: self.name.clone(),
            description: self.description.clone(),
            resource_type_ids: self.resource_type_ids.clone(),
            field_definitions,
        })
    }
}

/// One field definition, keyed by its field name in `fieldDefinitions`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldConfig {
    #[serde(rename = "type")]
    pub field_type: FieldTypeConfig,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub input_hint: InputHint,
    pub label: LocalizedString,
}

impl FieldConfig {
    pub fn to_definition(&self, name: &str) -> Result<FieldDefinition, String> {
        Ok(FieldDefinition {
            name: name.to_string(),
            field_type: self.field_type.resolve()?,
            required: self.required,
            input_hint: self.input_hint,
            label: self.label.clone(),
        })
    }
}

/// Field kinds accepted in config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum FieldKind {
    Boolean,
    String,
    LocalizedString,
    Enum,
    Number,
    Money,
    Date,
    Time,
    DateTime,
    Set,
    Reference,
}

/// A field type as written in config
///
/// Enum values are a `key: label` map here and become a list of
/// [`EnumValue`] on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldTypeConfig {
    pub name: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<Box<FieldTypeConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<OrderedMap<String>>,
}

impl FieldTypeConfig {
    pub fn of(name: FieldKind) -> Self {
        Self {
            name,
            reference_type_id: None,
            element_type: None,
            values: None,
        }
    }

    /// Convert to the model type, checking the attributes each kind needs.
    pub fn resolve(&self) -> Result<FieldType, String> {
        let resolved = match self.name {
            FieldKind::Boolean => FieldType::Boolean,
            FieldKind::String => FieldType::String,
            FieldKind::LocalizedString => FieldType::LocalizedString,
            FieldKind::Number => FieldType::Number,
            FieldKind::Money => FieldType::Money,
            FieldKind::Date => FieldType::Date,
            FieldKind::Time => FieldType::Time,
            FieldKind::DateTime => FieldType::DateTime,
            FieldKind::Enum => {
                let values: Vec<EnumValue> = self
                    .values
                    .iter()
                    .flat_map(|values| values.iter())
                    .map(|(key, label)| EnumValue::new(key, label.as_str()))
                    .collect();
                if values.is_empty() {
                    return Err("Enum fields need at least one value".into());
                }
                FieldType::Enum { values }
            }
            FieldKind::Set => {
                let element = self
                    .element_type
                    .as_deref()
                    .ok_or("Set fields need an elementType")?;
                if element.name == FieldKind::Reference {
                    return Err("Set fields cannot hold references".into());
                }
                FieldType::Set {
                    element_type: Box::new(element.resolve()?),
                }
            }
            FieldKind::Reference => match self.reference_type_id.as_deref() {
                Some(id) if !id.is_empty() => FieldType::Reference {
                    reference_type_id: id.to_string(),
                },
                _ => return Err("Reference fields need a referenceTypeId".into()),
            },
        };
        Ok(resolved)
    }
}
