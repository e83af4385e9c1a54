//! Reconciler implementation
//!
//! Drives one run: snapshot the persisted types, plan the sweep and the
//! per-type requests, then issue them one at a time.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::actions::synthesize;
use crate::filter::KeyFilter;
use crate::model::{DesiredType, PersistedType};
use crate::store::{RemoteStore, StoreError};
use crate::{Error, Result};

use super::plan::{PlannedChange, ReconcilePlan, SweepDecision};
use super::report::{Operation, Outcome, ReconcileReport};

/// Reconciles configured custom types against a remote store
///
/// Requests are strictly sequential: the sweep first, in persisted order,
/// then one create or update per configured type, in configuration order.
/// A failed request is recorded and the run moves on; only transport
/// failures abort it.
pub struct Reconciler<S> {
    store: S,
    desired: Vec<DesiredType>,
    filter: KeyFilter,
}

impl<S: RemoteStore> Reconciler<S> {
    /// Create a reconciler with an open whitelist
    pub fn new(store: S, desired: Vec<DesiredType>) -> Self {
        Self {
            store,
            desired,
            filter: KeyFilter::none(),
        }
    }

    /// Restrict the deletion sweep to keys matching `filter`
    pub fn with_filter(mut self, filter: KeyFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn desired(&self) -> &[DesiredType] {
        &self.desired
    }

    /// Query the store and plan the run
    ///
    /// # Errors
    ///
    /// Returns [`Error::Query`] if the persisted types cannot be loaded.
    pub async fn plan(&self) -> Result<ReconcilePlan> {
        let persisted = self.store.query().await.map_err(Error::Query)?;
        debug!(count = persisted.len(), "Loaded persisted types");
        Ok(self.plan_against(&persisted))
    }

    /// Plan the run against a snapshot of persisted types
    pub fn plan_against(&self, persisted: &[PersistedType]) -> ReconcilePlan {
        let desired_keys: HashSet<&str> = self.desired.iter().map(|d| d.key.as_str()).collect();

        let sweep = persisted
            .iter()
            .filter(|saved| !desired_keys.contains(saved.key.as_str()))
            .map(|saved| {
                if self.filter.matches(&saved.key) {
                    debug!(key = %saved.key, "Not configured, scheduling delete");
                    SweepDecision::Delete {
                        key: saved.key.clone(),
                        version: saved.version,
                    }
                } else {
                    debug!(key = %saved.key, "Not configured, outside whitelist");
                    SweepDecision::Untouched {
                        key: saved.key.clone(),
                    }
                }
            })
            .collect();

        let changes = self
            .desired
            .iter()
            .map(|desired| match persisted.iter().find(|p| p.key == desired.key) {
                Some(saved) => {
                    let actions = synthesize(desired, saved);
                    debug!(key = %desired.key, actions = actions.len(), "Planned update");
                    PlannedChange::Update {
                        key: saved.key.clone(),
                        version: saved.version,
                        actions,
                    }
                }
                None => {
                    debug!(key = %desired.key, "Planned create");
                    PlannedChange::Create {
                        draft: desired.clone(),
                    }
                }
            })
            .collect();

        ReconcilePlan { sweep, changes }
    }

    /// Issue the requests of `plan` and collect their outcomes
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] as soon as the store becomes unreachable.
    pub async fn execute(&self, plan: &ReconcilePlan) -> Result<ReconcileReport> {
        let sweep = self.execute_sweep(plan).await?;
        let pass = self.execute_changes(plan).await?;
        Ok(sweep.merge(pass))
    }

    /// Plan and execute in one step
    pub async fn run(&self) -> Result<ReconcileReport> {
        let plan = self.plan().await?;
        self.execute(&plan).await
    }

    async fn execute_sweep(&self, plan: &ReconcilePlan) -> Result<ReconcileReport> {
        let mut report = ReconcileReport::new();

        for decision in &plan.sweep {
            match decision {
                SweepDecision::Delete { key, version } => {
                    info!(key = %key, version, "Deleting type");
                    let outcome = classify(key, self.store.delete(key, *version).await)?;
                    report.record(key.clone(), Operation::Deleted, outcome);
                }
                SweepDecision::Untouched { key } => {
                    report.record(key.clone(), Operation::Untouched, Outcome::Success);
                }
            }
        }

        Ok(report)
    }

    async fn execute_changes(&self, plan: &ReconcilePlan) -> Result<ReconcileReport> {
        let mut report = ReconcileReport::new();

        for change in &plan.changes {
            match change {
                PlannedChange::Create { draft } => {
                    info!(key = %draft.key, "Creating type");
                    let outcome = classify(&draft.key, self.store.create(draft).await)?;
                    report.record(draft.key.clone(), Operation::Created, outcome);
                }
                PlannedChange::Update {
                    key,
                    version,
                    actions,
                } => {
                    info!(key = %key, version, actions = actions.len(), "Updating type");
                    let operation = if actions.is_empty() {
                        Operation::Unchanged
                    } else {
                        Operation::Updated
                    };
                    let outcome = classify(key, self.store.update(key, *version, actions).await)?;
                    report.record(key.clone(), operation, outcome);
                }
            }
        }

        Ok(report)
    }
}

/// Turn a store response into an outcome, or abort on transport failure
fn classify<T>(key: &str, response: std::result::Result<T, StoreError>) -> Result<Outcome> {
    match response {
        Ok(_) => Ok(Outcome::Success),
        Err(error) if error.is_fatal() => Err(Error::Transport {
            key: key.to_string(),
            source: error,
        }),
        Err(error) => {
            warn!(key = %key, error = %error, "Request failed");
            Ok(Outcome::from(&error))
        }
    }
}
