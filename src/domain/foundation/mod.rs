//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, the state machine contract and the error
//! vocabulary shared by every GatherUp domain area.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{EventId, NotificationId, TicketId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
