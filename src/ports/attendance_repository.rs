//! Attendance repository port.
//!
//! # Admission contract
//!
//! [`AttendanceRepository::admit`] is the only way an attendance record is
//! created. Implementations must, inside one scope serialized per event:
//!
//! 1. re-read the event's capacity and ticketing mode,
//! 2. count occupied seats as described by [`Event::occupancy_basis`],
//!    excluding the joining user,
//! 3. ask [`CapacityLedger::admit`] and insert only if admitted.
//!
//! Two concurrent admissions for the same event must never both observe
//! the last free seat.
//!
//! [`CapacityLedger::admit`]: crate::domain::event::CapacityLedger::admit

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::attendance::Attendance;
use crate::domain::event::Event;
use crate::domain::foundation::{DomainError, EventId, Timestamp, UserId};

/// Result of an admission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined(Attendance),
    /// A record for (event, user) already exists.
    AlreadyJoined,
    /// No seat was free at decision time.
    Full { occupancy: u64 },
    /// The event disappeared between lookup and admission.
    EventNotFound,
}

/// Attendee row joined with the user's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendeeView {
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
    pub joined_at: Timestamp,
    pub rsvp: bool,
}

/// One of the caller's joined events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinedEventView {
    pub event_id: EventId,
    pub event_name: String,
    pub location: String,
    pub starts_at: Timestamp,
    pub joined_at: Timestamp,
    pub rsvp: bool,
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Count-and-insert under event-scoped serialization. See module docs.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn admit(&self, event: &Event, attendance: &Attendance)
        -> Result<JoinOutcome, DomainError>;

    async fn find(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<Option<Attendance>, DomainError>;

    /// Delete the record. Returns false if there was nothing to delete.
    async fn remove(&self, event_id: &EventId, user_id: &UserId) -> Result<bool, DomainError>;

    /// Attendees of an event, earliest joiner first.
    async fn list_attendees(&self, event_id: &EventId) -> Result<Vec<AttendeeView>, DomainError>;

    /// Events a user has joined, most recently joined first.
    async fn list_joined_events(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<JoinedEventView>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AttendanceRepository) {}
    }
}
