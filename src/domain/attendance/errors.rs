//! Attendance-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | EventNotFound, UserNotFound, NotAttending | 404 |
//! | AlreadyJoined, EventFull | 400 |
//! | Forbidden | 403 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::event::Capacity;
use crate::domain::foundation::{DomainError, ErrorCode, EventId, UserId};

/// Attendance-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceError {
    EventNotFound(EventId),

    /// Identity directory has no profile for the user.
    UserNotFound(UserId),

    AlreadyJoined { event_id: EventId, user_id: UserId },

    EventFull { event_id: EventId, capacity: Capacity },

    NotAttending { event_id: EventId, user_id: UserId },

    Forbidden(String),

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl AttendanceError {
    pub fn event_not_found(event_id: EventId) -> Self {
        AttendanceError::EventNotFound(event_id)
    }

    pub fn user_not_found(user_id: UserId) -> Self {
        AttendanceError::UserNotFound(user_id)
    }

    pub fn already_joined(event_id: EventId, user_id: UserId) -> Self {
        AttendanceError::AlreadyJoined { event_id, user_id }
    }

    pub fn event_full(event_id: EventId, capacity: Capacity) -> Self {
        AttendanceError::EventFull { event_id, capacity }
    }

    pub fn not_attending(event_id: EventId, user_id: UserId) -> Self {
        AttendanceError::NotAttending { event_id, user_id }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        AttendanceError::Forbidden(reason.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AttendanceError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AttendanceError::EventNotFound(_) => ErrorCode::EventNotFound,
            AttendanceError::UserNotFound(_) => ErrorCode::UserNotFound,
            AttendanceError::AlreadyJoined { .. } => ErrorCode::AlreadyJoined,
            AttendanceError::EventFull { .. } => ErrorCode::EventFull,
            AttendanceError::NotAttending { .. } => ErrorCode::NotAttending,
            AttendanceError::Forbidden(_) => ErrorCode::Forbidden,
            AttendanceError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AttendanceError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            AttendanceError::EventNotFound(id) => format!("Event not found: {}", id),
            AttendanceError::UserNotFound(id) => format!("User not found with id {}", id),
            AttendanceError::AlreadyJoined { .. } => "Already joined the event".to_string(),
            AttendanceError::EventFull { capacity, .. } => {
                format!("Event is full (capacity {})", capacity)
            }
            AttendanceError::NotAttending { .. } => "User not attending".to_string(),
            AttendanceError::Forbidden(reason) => reason.clone(),
            AttendanceError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AttendanceError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AttendanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AttendanceError {}

impl From<DomainError> for AttendanceError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => AttendanceError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => AttendanceError::Infrastructure(err.to_string()),
        }
    }
}

impl From<AttendanceError> for DomainError {
    fn from(err: AttendanceError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
