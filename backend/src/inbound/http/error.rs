//! HTTP mapping for call-fatal sync errors.
//!
//! Keeps [`SyncError`] transport-agnostic while letting Actix handlers turn
//! a failed call into the boundary's `{status: "error", message}` body with
//! the right status code.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;

use crate::domain::SyncError;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, SyncError>;

/// Error body shape shared by every failed sync call.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    message: &'a str,
}

impl ResponseError for SyncError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPayload { .. } => StatusCode::BAD_REQUEST,
            Self::ClearFailed { .. } | Self::Fault { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            error!(error = %self, "sync call aborted");
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            status: "error",
            message: &self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn invalid_payload_maps_to_bad_request() {
        let error = SyncError::invalid_payload("payload must be a JSON array");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    fn clear_failure_and_fault_map_to_internal_error() {
        let clear = SyncError::clear_failed("dine_bill", "refused");
        assert_eq!(clear.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let fault = SyncError::fault("dine_bill", "connection reset");
        assert_eq!(fault.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[rstest]
    fn error_body_carries_status_and_message() {
        let error = SyncError::clear_failed("acc_users", "locked");
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
