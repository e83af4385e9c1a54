//! Reconciliation of configured types against the remote store
//!
//! - **plan**: the sweep decisions and per-type requests of one run
//! - **engine**: the [`Reconciler`] that computes and executes a plan
//! - **report**: per-type outcomes collected while executing

mod engine;
mod plan;
mod report;

pub use engine::Reconciler;
pub use plan::{PlannedChange, ReconcilePlan, SweepDecision};
pub use report::{Operation, Outcome, ReconcileReport, TypeResult};
