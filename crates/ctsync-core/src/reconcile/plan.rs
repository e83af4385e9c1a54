//! Requests a reconciliation run would issue
//!
//! A plan is computed from one snapshot of the persisted types and contains
//! everything needed to execute the run without looking at the store again.

use serde::Serialize;

use crate::actions::ChangeAction;
use crate::model::DesiredType;

/// Decision for one persisted type that is not configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum SweepDecision {
    /// Eligible under the whitelist, delete at the observed version
    Delete { key: String, version: u64 },
    /// Outside the whitelist, leave alone
    Untouched { key: String },
}

impl SweepDecision {
    pub fn key(&self) -> &str {
        match self {
            SweepDecision::Delete { key, .. } | SweepDecision::Untouched { key } => key,
        }
    }
}

/// Request for one configured type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "lowercase")]
pub enum PlannedChange {
    /// Not persisted yet
    Create { draft: DesiredType },
    /// Persisted; the batch may be empty
    Update {
        key: String,
        version: u64,
        actions: Vec<ChangeAction>,
    },
}

impl PlannedChange {
    pub fn key(&self) -> &str {
        match self {
            PlannedChange::Create { draft } => &draft.key,
            PlannedChange::Update { key, .. } => key,
        }
    }

    /// True for an update with an empty batch
    pub fn is_noop(&self) -> bool {
        matches!(self, PlannedChange::Update { actions, .. } if actions.is_empty())
    }
}

/// Ordered requests of one run: the sweep first, then configured types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcilePlan {
    /// Undesired persisted types, in persisted order
    pub sweep: Vec<SweepDecision>,
    /// Configured types, in configuration order
    pub changes: Vec<PlannedChange>,
}

impl ReconcilePlan {
    /// Keys scheduled for deletion
    pub fn deletions(&self) -> impl Iterator<Item = (&str, u64)> {
        self.sweep.iter().filter_map(|decision| match decision {
            SweepDecision::Delete { key, version } => Some((key.as_str(), *version)),
            SweepDecision::Untouched { .. } => None,
        })
    }

    /// Keys left alone by the sweep
    pub fn untouched(&self) -> impl Iterator<Item = &str> {
        self.sweep.iter().filter_map(|decision| match decision {
            SweepDecision::Untouched { key } => Some(key.as_str()),
            SweepDecision::Delete { .. } => None,
        })
    }

    /// Look up the planned change for a configured key
    pub fn change(&self, key: &str) -> Option<&PlannedChange> {
        self.changes.iter().find(|c| c.key() == key)
    }

    /// True if executing the plan would not modify the store
    pub fn is_noop(&self) -> bool {
        self.deletions().next().is_none() && self.changes.iter().all(PlannedChange::is_noop)
    }
}
