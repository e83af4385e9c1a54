//! Diffing and reconciliation engine for commercetools custom types
//!
//! This crate computes how to move the persisted custom types of a project
//! to the shape declared in configuration, and drives the resulting requests
//! through a [`RemoteStore`]:
//!
//! - **Model**: desired and persisted type definitions
//! - **Comparator**: label, membership, and order differences between field lists
//! - **Synthesizer**: a fixed, ordered rule table producing update actions
//! - **Reconciler**: deletion sweep, then create or update per configured type
//! - **Report**: per-type outcomes for the presentation layer
//!
//! # Architecture
//!
//! ```text
//!             ctsync-cli
//!                 |
//!     +-----------+-----------+
//!     |           |           |
//! ctsync-meta ctsync-core ctsync-client
//! ```
//!
//! # Example
//!
//! ```ignore
//! use ctsync_core::{KeyFilter, Reconciler};
//!
//! let reconciler = Reconciler::new(store, desired).with_filter(KeyFilter::literal("order-"));
//! let report = reconciler.run().await?;
//! std::process::exit(report.exit_code());
//! ```

pub mod actions;
pub mod collection;
pub mod diff;
pub mod error;
pub mod filter;
pub mod model;
pub mod reconcile;
pub mod store;

pub use actions::{synthesize, ActionKind, ChangeAction, Rule, RULES};
pub use collection::CustomTypeCollection;
pub use diff::FieldDiff;
pub use error::{Error, Result};
pub use filter::KeyFilter;
pub use model::{
    DesiredType, EnumValue, FieldDefinition, FieldDefinitions, FieldType, InputHint,
    LocalizedString, PersistedType,
};
pub use reconcile::{
    Operation, Outcome, PlannedChange, ReconcilePlan, ReconcileReport, Reconciler, SweepDecision,
    TypeResult,
};
pub use store::{RemoteError, RemoteStore, StoreError};
