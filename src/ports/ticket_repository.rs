//! Ticket repository port.
//!
//! Tickets are never deleted. Every write is either an admission-guarded
//! insert or a compare-and-set on the ticket's prior status, so a caller
//! that loses a race gets a [`TransitionOutcome::Conflict`] and reloads
//! instead of silently overwriting a newer state.

use async_trait::async_trait;

use crate::domain::event::Event;
use crate::domain::foundation::{DomainError, EventId, TicketId, UserId};
use crate::domain::ticket::{ArtifactRef, Ticket, TicketNumber, TicketStatus, VerificationToken};

/// Result of inserting a new ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    Issued(Ticket),
    /// The user already holds this live ticket for the event.
    ExistingLive(Ticket),
    /// No seat was free for a capacity-consuming ticket.
    Full { occupancy: u64 },
    /// Ticket number or verification token collided with a stored ticket.
    DuplicateCredentials,
    EventNotFound,
}

/// Result of a compare-and-set status write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied,
    /// Stored status no longer matched the expected prior status.
    Conflict,
    /// Confirmation refused because the event is full.
    Full { occupancy: u64 },
}

#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Insert a freshly issued ticket.
    ///
    /// Inside one scope serialized per event the implementation must check
    /// for an existing live ticket of (event, user), then, if the new ticket
    /// consumes capacity, count occupied seats excluding the holder and
    /// consult the capacity ledger.
    async fn issue(&self, event: &Event, ticket: &Ticket) -> Result<IssueOutcome, DomainError>;

    /// Persist `ticket` as confirmed if it is still in `expected` state and a
    /// seat is free. Serialized per event like [`TicketRepository::issue`].
    async fn confirm(
        &self,
        event: &Event,
        ticket: &Ticket,
        expected: TicketStatus,
    ) -> Result<TransitionOutcome, DomainError>;

    /// Persist a status change that takes no seat (reject, revoke, check-in)
    /// if the stored status still equals `expected`.
    async fn transition(
        &self,
        ticket: &Ticket,
        expected: TicketStatus,
    ) -> Result<TransitionOutcome, DomainError>;

    /// Record the rendered document for a ticket.
    async fn attach_artifact(
        &self,
        id: &TicketId,
        artifact: &ArtifactRef,
    ) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, DomainError>;

    async fn find_by_number(&self, number: &TicketNumber) -> Result<Option<Ticket>, DomainError>;

    async fn find_by_token(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<Ticket>, DomainError>;

    /// The pending, confirmed or used ticket of (event, user), if any.
    async fn find_live(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<Option<Ticket>, DomainError>;

    /// A user's tickets, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Ticket>, DomainError>;

    /// An event's tickets, newest first.
    async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<Ticket>, DomainError>;
}
