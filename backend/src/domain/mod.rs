//! Domain types and the snapshot synchronisation engine.
//!
//! Purpose: validate raw point-of-sale snapshot records, reconcile them
//! against storage through the [`ports`] boundary, and report per-record
//! outcomes. Transport concerns live in the inbound adapters; SQL concerns
//! live in the outbound adapters.

pub mod entity;
pub mod error;
pub mod ports;
pub mod record;
pub mod report;
pub mod sync_service;
pub mod validate;

pub use self::entity::{EntityKind, ReplaceMode, SyncPolicy};
pub use self::error::SyncError;
pub use self::record::{
    AccountUser, BillRecord, CancelledBill, KotSaleLine, MenuItem, RecordKey, ValidRecord,
};
pub use self::report::{ClearPath, RecordFailure, SyncReport, SyncStatus};
pub use self::sync_service::SnapshotSyncService;
pub use self::validate::{FieldError, FieldErrorKind, FieldErrors, validate};
