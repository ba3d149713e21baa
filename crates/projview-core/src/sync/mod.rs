//! Reconciliation of the view tree against the record
//!
//! - **engine**: mark-and-sweep that creates missing links and removes
//!   stale entries
//! - **report**: actions and warnings produced by a pass

mod engine;
mod report;

pub use engine::ReconcileEngine;
pub use report::{SyncAction, SyncOptions, SyncReport, SyncWarning};
