//! Boundary response shapes for the sync endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{RecordFailure, SyncReport, SyncStatus};

/// One skipped record echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordErrorDto {
    /// The offending payload exactly as received, so the caller can correct
    /// and resubmit just this subset if desired.
    pub record: Value,
    /// Human-readable reason the record was skipped.
    pub error: String,
}

impl From<RecordFailure> for RecordErrorDto {
    fn from(failure: RecordFailure) -> Self {
        Self {
            record: failure.record,
            error: failure.reason,
        }
    }
}

/// Response body for `POST /api/<resource>/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResponse {
    /// `success` or `partial_success`.
    pub status: SyncStatus,
    /// Operator-facing summary naming the table, count, and clearing path.
    pub message: String,
    /// Number of records persisted.
    pub created: u64,
    /// Number of records received.
    pub total_received: u64,
    /// Skipped records in input order.
    pub errors: Vec<RecordErrorDto>,
}

impl From<SyncReport> for SyncResponse {
    fn from(report: SyncReport) -> Self {
        let message = report.message();
        Self {
            status: report.status,
            message,
            created: report.created,
            total_received: report.total_received,
            errors: report.errors.into_iter().map(RecordErrorDto::from).collect(),
        }
    }
}

/// Response body for `GET /api/<resource>/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResponse {
    /// Always `"success"`; failures use the error body instead.
    pub status: &'static str,
    /// Number of rows returned.
    pub count: usize,
    /// Current table content in primary-key order.
    pub data: Vec<Value>,
}

impl ListResponse {
    /// Wrap listed rows in the boundary shape.
    #[must_use]
    pub fn new(data: Vec<Value>) -> Self {
        Self {
            status: "success",
            count: data.len(),
            data,
        }
    }
}
