//! Per-type outcomes of a reconciliation run

use std::fmt;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::store::StoreError;

/// Result of the request issued for one type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The store accepted the request
    Success,
    /// The store rejected the request with a structured error,
    /// formatted as `"message (correlationId)"`
    RemoteError(String),
    /// The request failed without a structured error
    Unknown,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

impl From<&StoreError> for Outcome {
    fn from(error: &StoreError) -> Self {
        match error {
            StoreError::Remote(remote) => Outcome::RemoteError(remote.to_string()),
            StoreError::Unexpected { .. } | StoreError::Transport { .. } => Outcome::Unknown,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::RemoteError(message) => write!(f, "{}", message),
            Outcome::Unknown => write!(f, "Unknown error"),
        }
    }
}

/// Serialized as `true`, the error string, or `false`
impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Outcome::Success => serializer.serialize_bool(true),
            Outcome::RemoteError(message) => serializer.serialize_str(message),
            Outcome::Unknown => serializer.serialize_bool(false),
        }
    }
}

/// What the run did, or tried to do, for one type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Created,
    Updated,
    /// Update issued with an empty batch
    Unchanged,
    Deleted,
    /// Persisted, not configured, and outside the whitelist
    Untouched,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Created => "created",
            Operation::Updated => "updated",
            Operation::Unchanged => "unchanged",
            Operation::Deleted => "deleted",
            Operation::Untouched => "untouched",
        };
        f.write_str(label)
    }
}

/// Operation and outcome for one type key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeResult {
    pub operation: Operation,
    pub outcome: Outcome,
}

impl Serialize for TypeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TypeResult", 2)?;
        state.serialize_field("operation", &self.operation)?;
        state.serialize_field("status", &self.outcome)?;
        state.end()
    }
}

/// Ordered mapping from type key to its result
///
/// Recording a key twice replaces the earlier result in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    entries: Vec<(String, TypeResult)>,
}

impl ReconcileReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result for `key`, overwriting any earlier one
    pub fn record(&mut self, key: impl Into<String>, operation: Operation, outcome: Outcome) {
        let key = key.into();
        let result = TypeResult { operation, outcome };
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = result,
            None => self.entries.push((key, result)),
        }
    }

    /// Merge `other` into this report; its entries win on key collisions
    pub fn merge(mut self, other: ReconcileReport) -> Self {
        for (key, result) in other.entries {
            self.record(key, result.operation, result.outcome);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&TypeResult> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, result)| result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeResult)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// Entries whose outcome is not a success
    pub fn failures(&self) -> impl Iterator<Item = (&str, &TypeResult)> {
        self.iter().filter(|(_, r)| !r.outcome.is_success())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if every recorded outcome is a success
    pub fn is_success(&self) -> bool {
        self.entries.iter().all(|(_, r)| r.outcome.is_success())
    }

    /// Process exit code: 0 when everything succeeded, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}

impl Serialize for ReconcileReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, result) in &self.entries {
            map.serialize_entry(key, result)?;
        }
        map.end()
    }
}
