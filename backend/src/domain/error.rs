//! Call-fatal sync errors.
//!
//! Per-record failures are not errors at this level; they travel inside the
//! [`SyncReport`](super::report::SyncReport). This type covers the faults
//! that abort a whole sync call. The HTTP adapter maps it to a status code
//! and a `{status: "error", message}` body.

/// A fault that aborts an entire sync call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// The request body is not an acceptable snapshot shape.
    #[error("{message}")]
    InvalidPayload {
        /// Reason shown to the caller.
        message: String,
    },

    /// Neither clearing strategy could empty the table; nothing was ingested.
    #[error("failed to clear table {table}: {message}")]
    ClearFailed {
        /// Physical table that could not be cleared.
        table: &'static str,
        /// Adapter-reported reason.
        message: String,
    },

    /// An unexpected storage fault interrupted the call; no per-record
    /// breakdown is available.
    #[error("sync of {table} aborted: {message}")]
    Fault {
        /// Physical table being synchronised.
        table: &'static str,
        /// Adapter-reported reason.
        message: String,
    },
}

impl SyncError {
    /// Build an [`SyncError::InvalidPayload`].
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    /// Build a [`SyncError::ClearFailed`].
    pub fn clear_failed(table: &'static str, message: impl Into<String>) -> Self {
        Self::ClearFailed {
            table,
            message: message.into(),
        }
    }

    /// Build a [`SyncError::Fault`].
    pub fn fault(table: &'static str, message: impl Into<String>) -> Self {
        Self::Fault {
            table,
            message: message.into(),
        }
    }
}
