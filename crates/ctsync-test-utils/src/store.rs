//! [`MemoryStore`], an in-memory remote store for reconciliation tests.
//!
//! Behaves like the platform for the operations the reconciler uses:
//! versions are checked and bumped, update batches are applied atomically in
//! submission order, and every request is recorded for later assertions.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use ctsync_core::{
    ChangeAction, DesiredType, FieldDefinitions, PersistedType, RemoteError, RemoteStore,
    StoreError,
};

/// A request received by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Query,
    Create {
        key: String,
    },
    Update {
        key: String,
        version: u64,
        actions: Vec<ChangeAction>,
    },
    Delete {
        key: String,
        version: u64,
    },
}

impl Request {
    /// The type key this request targets, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Request::Query => None,
            Request::Create { key }
            | Request::Update { key, .. }
            | Request::Delete { key, .. } => Some(key),
        }
    }
}

/// In-memory [`RemoteStore`] with scripted failures.
#[derive(Debug, Default)]
pub struct MemoryStore {
    types: Mutex<Vec<PersistedType>>,
    requests: Mutex<Vec<Request>>,
    failures: Mutex<HashMap<String, StoreError>>,
    query_failure: Mutex<Option<StoreError>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `types`.
    pub fn with_types(types: Vec<PersistedType>) -> Self {
        Self {
            types: Mutex::new(types),
            ..Self::default()
        }
    }

    /// Fail every create, update, or delete of `key` with `error`.
    pub fn fail_key(self, key: &str, error: StoreError) -> Self {
        self.failures.lock().unwrap().insert(key.to_string(), error);
        self
    }

    /// Fail the initial query with `error`.
    pub fn fail_query(self, error: StoreError) -> Self {
        *self.query_failure.lock().unwrap() = Some(error);
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests other than the initial query.
    pub fn writes(&self) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| *r != Request::Query)
            .collect()
    }

    /// The stored type with `key`.
    pub fn get(&self, key: &str) -> Option<PersistedType> {
        self.types
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.key == key)
            .cloned()
    }

    /// Keys of all stored types, in storage order.
    pub fn keys(&self) -> Vec<String> {
        self.types
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.key.clone())
            .collect()
    }

    fn record(&self, request: Request) {
        self.requests.lock().unwrap().push(request);
    }

    fn scripted_failure(&self, key: &str) -> Result<(), StoreError> {
        match self.failures.lock().unwrap().get(key) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn remote(message: impl Into<String>) -> StoreError {
    StoreError::Remote(RemoteError::new(message, "memory-store"))
}

fn check_version(saved: &PersistedType, version: u64) -> Result<(), StoreError> {
    if saved.version != version {
        return Err(remote(format!(
            "Object {} has a different version than expected. Expected: {} - Actual: {}.",
            saved.id, version, saved.version
        )));
    }
    Ok(())
}

/// Apply one batch to a copy of `saved`, in submission order.
fn apply_actions(saved: &PersistedType, actions: &[ChangeAction]) -> Result<PersistedType, StoreError> {
    let mut updated = saved.clone();
    let mut fields: Vec<_> = updated.field_definitions.iter().cloned().collect();

    for action in actions {
        match action {
            ChangeAction::ChangeFieldLabel { field_name, label } => {
                let field = fields
                    .iter_mut()
                    .find(|f| f.name == *field_name)
                    .ok_or_else(|| remote(format!("Field '{}' does not exist.", field_name)))?;
                field.label = label.clone();
            }
            ChangeAction::AddField { field_definition } => {
                if fields.iter().any(|f| f.name == field_definition.name) {
                    return Err(remote(format!(
                        "A field with name '{}' already exists.",
                        field_definition.name
                    )));
                }
                fields.push(field_definition.clone());
            }
            ChangeAction::RemoveField { field_name } => {
                let before = fields.len();
                fields.retain(|f| f.name != *field_name);
                if fields.len() == before {
                    return Err(remote(format!("Field '{}' does not exist.", field_name)));
                }
            }
            ChangeAction::ChangeFieldOrder { field_names } => {
                let mut reordered = Vec::with_capacity(fields.len());
                for name in field_names {
                    let field = fields
                        .iter()
                        .find(|f| f.name == *name)
                        .ok_or_else(|| remote(format!("Field '{}' does not exist.", name)))?;
                    reordered.push(field.clone());
                }
                if reordered.len() != fields.len() {
                    return Err(remote(
                        "The given field names do not match the existing field definitions.",
                    ));
                }
                fields = reordered;
            }
            ChangeAction::SetDescription { description } => {
                updated.description = description.clone();
            }
            ChangeAction::ChangeName { name } => {
                updated.name = name.clone();
            }
        }
    }

    updated.field_definitions = FieldDefinitions::new(fields);
    if !actions.is_empty() {
        updated.version += 1;
    }
    Ok(updated)
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn query(&self) -> Result<Vec<PersistedType>, StoreError> {
        self.record(Request::Query);
        if let Some(error) = self.query_failure.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(self.types.lock().unwrap().clone())
    }

    async fn create(&self, draft: &DesiredType) -> Result<PersistedType, StoreError> {
        self.record(Request::Create {
            key: draft.key.clone(),
        });
        self.scripted_failure(&draft.key)?;

        let mut types = self.types.lock().unwrap();
        if types.iter().any(|t| t.key == draft.key) {
            return Err(remote(format!(
                "A duplicate value '\"{}\"' exists for field 'key'.",
                draft.key
            )));
        }

        let created = PersistedType {
            id: format!("id-{}", draft.key),
            version: 1,
            key: draft.key.clone(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            resource_type_ids: draft.resource_type_ids.clone(),
            field_definitions: FieldDefinitions::new(draft.field_definitions.clone()),
        };
        types.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        key: &str,
        version: u64,
        actions: &[ChangeAction],
    ) -> Result<PersistedType, StoreError> {
        self.record(Request::Update {
            key: key.to_string(),
            version,
            actions: actions.to_vec(),
        });
        self.scripted_failure(key)?;

        let mut types = self.types.lock().unwrap();
        let saved = types
            .iter_mut()
            .find(|t| t.key == key)
            .ok_or_else(|| remote(format!("The Resource with key '{}' was not found.", key)))?;
        check_version(saved, version)?;

        let updated = apply_actions(saved, actions)?;
        *saved = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, key: &str, version: u64) -> Result<(), StoreError> {
        self.record(Request::Delete {
            key: key.to_string(),
            version,
        });
        self.scripted_failure(key)?;

        let mut types = self.types.lock().unwrap();
        let position = types
            .iter()
            .position(|t| t.key == key)
            .ok_or_else(|| remote(format!("The Resource with key '{}' was not found.", key)))?;
        check_version(&types[position], version)?;
        types.remove(position);
        Ok(())
    }
}
