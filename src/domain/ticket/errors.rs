//! Ticket-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound, EventNotFound, UserNotFound | 404 |
//! | TicketingDisabled, AlreadyHasTicket, EventFull | 400 |
//! | NotPending, InvalidAction, AlreadyUsed, AlreadyRevoked | 400 |
//! | AlreadyCheckedIn, NotConfirmed, InvalidState | 400 |
//! | DuplicateTicketToken, ConcurrentModification | 409 |
//! | Forbidden | 403 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::event::Capacity;
use crate::domain::foundation::{DomainError, ErrorCode, EventId, Timestamp, UserId};

use super::TicketStatus;

/// Ticket-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    /// No ticket matches the given id, number or token.
    NotFound(String),

    EventNotFound(EventId),

    UserNotFound(UserId),

    /// Event does not issue tickets.
    TicketingDisabled(EventId),

    /// The user already holds a pending, confirmed or used ticket.
    AlreadyHasTicket { event_id: EventId, user_id: UserId },

    EventFull { event_id: EventId, capacity: Capacity },

    /// Approval decisions only apply to pending tickets.
    NotPending { current: TicketStatus },

    /// Approval action was neither approve nor reject.
    InvalidAction(String),

    AlreadyUsed { used_at: Option<Timestamp> },

    AlreadyRevoked,

    /// Second check-in; carries the time of the first.
    AlreadyCheckedIn { used_at: Option<Timestamp> },

    /// Check-in attempted on a ticket that is neither confirmed nor used.
    NotConfirmed { current: TicketStatus },

    InvalidState {
        current: TicketStatus,
        attempted: String,
    },

    /// Credential generation kept colliding with existing tickets.
    DuplicateTicketToken,

    /// Ticket changed underneath the request and no precise cause was found.
    ConcurrentModification(String),

    /// Caller is not allowed to act on this ticket.
    Forbidden(String),

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl TicketError {
    pub fn not_found(reference: impl Into<String>) -> Self {
        TicketError::NotFound(reference.into())
    }

    pub fn event_not_found(event_id: EventId) -> Self {
        TicketError::EventNotFound(event_id)
    }

    pub fn user_not_found(user_id: UserId) -> Self {
        TicketError::UserNotFound(user_id)
    }

    pub fn ticketing_disabled(event_id: EventId) -> Self {
        TicketError::TicketingDisabled(event_id)
    }

    pub fn already_has_ticket(event_id: EventId, user_id: UserId) -> Self {
        TicketError::AlreadyHasTicket { event_id, user_id }
    }

    pub fn event_full(event_id: EventId, capacity: Capacity) -> Self {
        TicketError::EventFull { event_id, capacity }
    }

    pub fn not_pending(current: TicketStatus) -> Self {
        TicketError::NotPending { current }
    }

    pub fn invalid_action(action: impl Into<String>) -> Self {
        TicketError::InvalidAction(action.into())
    }

    pub fn invalid_state(current: TicketStatus, attempted: impl Into<String>) -> Self {
        TicketError::InvalidState {
            current,
            attempted: attempted.into(),
        }
    }

    pub fn concurrent_modification(reference: impl Into<String>) -> Self {
        TicketError::ConcurrentModification(reference.into())
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        TicketError::Forbidden(reason.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TicketError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        TicketError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            TicketError::NotFound(_) => ErrorCode::TicketNotFound,
            TicketError::EventNotFound(_) => ErrorCode::EventNotFound,
            TicketError::UserNotFound(_) => ErrorCode::UserNotFound,
            TicketError::TicketingDisabled(_) => ErrorCode::TicketingDisabled,
            TicketError::AlreadyHasTicket { .. } => ErrorCode::AlreadyHasTicket,
            TicketError::EventFull { .. } => ErrorCode::EventFull,
            TicketError::NotPending { .. } => ErrorCode::NotPending,
            TicketError::InvalidAction(_) => ErrorCode::InvalidAction,
            TicketError::AlreadyUsed { .. } => ErrorCode::AlreadyUsed,
            TicketError::AlreadyRevoked => ErrorCode::AlreadyRevoked,
            TicketError::AlreadyCheckedIn { .. } => ErrorCode::AlreadyCheckedIn,
            TicketError::NotConfirmed { .. } => ErrorCode::TicketNotConfirmed,
            TicketError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            TicketError::DuplicateTicketToken => ErrorCode::DuplicateTicketToken,
            TicketError::ConcurrentModification(_) => ErrorCode::ConcurrentModification,
            TicketError::Forbidden(_) => ErrorCode::Forbidden,
            TicketError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            TicketError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            TicketError::NotFound(reference) => format!("Ticket not found: {}", reference),
            TicketError::EventNotFound(id) => format!("Event not found: {}", id),
            TicketError::UserNotFound(id) => format!("User not found: {}", id),
            TicketError::TicketingDisabled(_) => {
                "Ticketing is not enabled for this event".to_string()
            }
            TicketError::AlreadyHasTicket { .. } => {
                "You already have a ticket for this event".to_string()
            }
            TicketError::EventFull { capacity, .. } => {
                format!("Event is sold out (capacity {})", capacity)
            }
            TicketError::NotPending { current } => {
                format!("Ticket is not pending approval (status: {})", current)
            }
            TicketError::InvalidAction(action) => {
                format!("Invalid action '{}': expected 'approve' or 'reject'", action)
            }
            TicketError::AlreadyUsed { .. } => "Ticket has already been used".to_string(),
            TicketError::AlreadyRevoked => "Ticket has already been revoked".to_string(),
            TicketError::AlreadyCheckedIn { used_at: Some(at) } => {
                format!("Ticket was already checked in at {}", at.to_rfc3339())
            }
            TicketError::AlreadyCheckedIn { used_at: None } => {
                "Ticket was already checked in".to_string()
            }
            TicketError::NotConfirmed { current } => {
                format!("Ticket is not confirmed (status: {})", current)
            }
            TicketError::InvalidState { current, attempted } => {
                format!("Cannot {} ticket in {} state", attempted, current)
            }
            TicketError::DuplicateTicketToken => {
                "Could not generate unique ticket credentials".to_string()
            }
            TicketError::ConcurrentModification(reference) => {
                format!("Ticket {} was modified concurrently, retry the request", reference)
            }
            TicketError::Forbidden(reason) => reason.clone(),
            TicketError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            TicketError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for TicketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for TicketError {}

impl From<DomainError> for TicketError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => TicketError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::DuplicateTicketToken => TicketError::DuplicateTicketToken,
            ErrorCode::ConcurrentModification => TicketError::ConcurrentModification(err.message),
            _ => TicketError::Infrastructure(err.to_string()),
        }
    }
}

impl From<TicketError> for DomainError {
    fn from(err: TicketError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
