//! Error responses for the HTTP adapter.
//!
//! One `IntoResponse` mapping per error area. Bodies carry the
//! machine-readable code; client errors also carry the area error's message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::attendance::AttendanceError;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::ticket::TicketError;

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

/// Server errors are logged in full and answered with a generic message.
fn respond(status: StatusCode, code: ErrorCode, message: String) -> Response {
    let message = if status.is_server_error() {
        tracing::error!(error_code = %code, message = %message, "Request failed");
        "An internal error occurred".to_string()
    } else {
        message
    };
    (status, Json(ErrorResponse::new(code.to_string(), message))).into_response()
}

// ════════════════════════════════════════════════════════════════════════════════
// Attendance
// ════════════════════════════════════════════════════════════════════════════════

pub struct AttendanceApiError(pub AttendanceError);

impl From<AttendanceError> for AttendanceApiError {
    fn from(err: AttendanceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AttendanceApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AttendanceError::EventNotFound(_)
            | AttendanceError::UserNotFound(_)
            | AttendanceError::NotAttending { .. } => StatusCode::NOT_FOUND,
            AttendanceError::AlreadyJoined { .. }
            | AttendanceError::EventFull { .. }
            | AttendanceError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            AttendanceError::Forbidden(_) => StatusCode::FORBIDDEN,
            AttendanceError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        respond(status, self.0.code(), self.0.message())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tickets
// ════════════════════════════════════════════════════════════════════════════════

pub struct TicketApiError(pub TicketError);

impl From<TicketError> for TicketApiError {
    fn from(err: TicketError) -> Self {
        Self(err)
    }
}

impl IntoResponse for TicketApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TicketError::NotFound(_)
            | TicketError::EventNotFound(_)
            | TicketError::UserNotFound(_) => StatusCode::NOT_FOUND,
            TicketError::TicketingDisabled(_)
            | TicketError::AlreadyHasTicket { .. }
            | TicketError::EventFull { .. }
            | TicketError::NotPending { .. }
            | TicketError::InvalidAction(_)
            | TicketError::AlreadyUsed { .. }
            | TicketError::AlreadyRevoked
            | TicketError::AlreadyCheckedIn { .. }
            | TicketError::NotConfirmed { .. }
            | TicketError::InvalidState { .. }
            | TicketError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            TicketError::DuplicateTicketToken | TicketError::ConcurrentModification(_) => {
                StatusCode::CONFLICT
            }
            TicketError::Forbidden(_) => StatusCode::FORBIDDEN,
            TicketError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        respond(status, self.0.code(), self.0.message())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Plain domain errors (read-only endpoints)
// ════════════════════════════════════════════════════════════════════════════════

pub struct DomainApiError(pub DomainError);

impl From<DomainError> for DomainApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for DomainApiError {
    fn into_response(self) -> Response {
        let status = match self.0.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
            ErrorCode::EventNotFound
            | ErrorCode::UserNotFound
            | ErrorCode::TicketNotFound
            | ErrorCode::NotificationNotFound => StatusCode::NOT_FOUND,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        respond(status, self.0.code, self.0.message)
    }
}
