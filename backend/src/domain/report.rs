//! Structured outcome of one sync call.
//!
//! The report is the engine's sole observability commitment: it carries the
//! per-record failures, the clearing strategy that ran, and enough context
//! for the boundary to render an operator-readable message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity::{EntityKind, ReplaceMode};

/// Overall outcome of a sync call that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Every received record was persisted.
    Success,
    /// Some records failed validation or storage; the rest were persisted.
    PartialSuccess,
}

/// Which clearing strategy emptied the table before ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearPath {
    /// Fast path: full-table truncate with identity restart.
    Truncate,
    /// Fallback: row-by-row delete, then best-effort sequence reset.
    DeleteRows,
}

impl ClearPath {
    /// Operator-facing label used in response messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Truncate => "truncate",
            Self::DeleteRows => "row delete",
        }
    }
}

/// One record that was received but not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFailure {
    /// The original payload as received, echoed back for resubmission.
    pub record: Value,
    /// Human-readable reason the record was skipped.
    pub reason: String,
}

/// Result of one completed sync call.
///
/// Invariant: `created + errors.len() == total_received`.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// Entity the call targeted.
    pub entity: EntityKind,
    /// Reconciliation mode that ran.
    pub mode: ReplaceMode,
    /// Overall outcome.
    pub status: SyncStatus,
    /// Number of records persisted.
    pub created: u64,
    /// Number of records received in the snapshot.
    pub total_received: u64,
    /// Records skipped, in input order, with original payloads.
    pub errors: Vec<RecordFailure>,
    /// Clearing strategy used; `None` in upsert mode.
    pub clear_path: Option<ClearPath>,
}

impl SyncReport {
    /// Operator-facing summary embedding table, count, and clearing path.
    #[must_use]
    pub fn message(&self) -> String {
        let table = self.entity.table();
        let created = self.created;
        match (self.mode, self.clear_path) {
            (ReplaceMode::FullReplace, Some(path)) => format!(
                "synced {created} {table} records (full replace, cleared via {})",
                path.describe()
            ),
            (ReplaceMode::FullReplace, None) => {
                format!("synced {created} {table} records (full replace)")
            }
            (ReplaceMode::UpsertByKey, _) => format!(
                "synced {created} {table} records (upsert by {})",
                self.entity.key_field()
            ),
        }
    }
}
