//! Reconciliation services.
//!
//! - [`inspector`]: classifies a requested write against the ledger
//! - [`ReconciliationEngine`]: create/overwrite/delete state machine
//! - [`Session`]: runs the engine against a prompt service

pub mod inspector;

mod engine;
mod session;

pub use engine::{CategoryStatus, ConfirmKind, Confirmation, ReconciliationEngine, Step};
pub use inspector::{classify, FileState};
pub use session::{Outcome, Session};
