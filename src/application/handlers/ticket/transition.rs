//! Compare-and-set persistence of ticket transitions.
//!
//! The domain operation runs on the loaded ticket, then the write is
//! conditioned on the status the ticket was loaded with. When another
//! request got there first, the operation is replayed against the fresh
//! state so the caller sees the precise reason (already used, already
//! revoked, ...) instead of a bare conflict.

use crate::domain::event::Event;
use crate::domain::ticket::{Ticket, TicketError};
use crate::ports::{TicketRepository, TransitionOutcome};

/// Applies `op` to `ticket` and persists a status change that takes no seat.
pub(crate) async fn apply_transition<T>(
    repository: &dyn TicketRepository,
    mut ticket: Ticket,
    op: impl Fn(&mut Ticket) -> Result<T, TicketError>,
) -> Result<(Ticket, T), TicketError> {
    let expected = ticket.status;
    let value = op(&mut ticket)?;

    match repository.transition(&ticket, expected).await? {
        TransitionOutcome::Applied => Ok((ticket, value)),
        TransitionOutcome::Conflict | TransitionOutcome::Full { .. } => {
            Err(explain_conflict(repository, &ticket, op).await)
        }
    }
}

/// Applies `op` to `ticket` and persists a capacity-guarded confirmation.
pub(crate) async fn apply_confirmation<T>(
    repository: &dyn TicketRepository,
    event: &Event,
    mut ticket: Ticket,
    op: impl Fn(&mut Ticket) -> Result<T, TicketError>,
) -> Result<(Ticket, T), TicketError> {
    let expected = ticket.status;
    let value = op(&mut ticket)?;

    match repository.confirm(event, &ticket, expected).await? {
        TransitionOutcome::Applied => Ok((ticket, value)),
        TransitionOutcome::Full { occupancy } => {
            tracing::info!(
                event_id = %event.id,
                ticket_number = %ticket.ticket_number,
                occupancy,
                capacity = %event.capacity,
                "Confirmation refused, event full"
            );
            Err(TicketError::event_full(event.id, event.capacity))
        }
        TransitionOutcome::Conflict => Err(explain_conflict(repository, &ticket, op).await),
    }
}

async fn explain_conflict<T>(
    repository: &dyn TicketRepository,
    attempted: &Ticket,
    op: impl Fn(&mut Ticket) -> Result<T, TicketError>,
) -> TicketError {
    let mut current = match repository.find_by_id(&attempted.id).await {
        Ok(Some(current)) => current,
        Ok(None) => return TicketError::not_found(attempted.id.to_string()),
        Err(e) => return e.into(),
    };

    tracing::info!(
        ticket_number = %attempted.ticket_number,
        stored_status = %current.status,
        "Ticket changed concurrently"
    );

    match op(&mut current) {
        Err(e) => e,
        Ok(_) => TicketError::concurrent_modification(attempted.ticket_number.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::event::{Capacity, TicketingPolicy};
    use crate::domain::foundation::{EventId, Timestamp, UserId};
    use crate::domain::ticket::{TicketCredentials, TicketNumber, TicketStatus, VerificationToken};

    async fn stored_ticket(store: &InMemoryStore, status: TicketStatus) -> Ticket {
        let event = Event::new(
            EventId::new(),
            UserId::new("organizer").unwrap(),
            "Talk",
            "Room",
            Timestamp::now(),
            Capacity::new(5).unwrap(),
            TicketingPolicy::Enabled {
                requires_approval: true,
                price_cents: None,
            },
        )
        .unwrap();
        store.insert_event(event.clone()).await;
        let ticket = Ticket::issue(
            TicketCredentials {
                number: TicketNumber::generate(Timestamp::now()),
                token: VerificationToken::new("ef".repeat(32)).unwrap(),
            },
            event.id,
            UserId::new("holder").unwrap(),
            status,
        );
        store.issue(&event, &ticket).await.unwrap();
        ticket
    }

    #[tokio::test]
    async fn stale_revoke_reports_already_used() {
        let store = InMemoryStore::new();
        let ticket = stored_ticket(&store, TicketStatus::Confirmed).await;

        // Someone checks the ticket in while we hold the confirmed copy.
        apply_transition(&store, ticket.clone(), |t| t.check_in())
            .await
            .unwrap();

        let result = apply_transition(&store, ticket, |t| t.revoke("late")).await;
        assert!(matches!(result, Err(TicketError::AlreadyUsed { .. })));
    }

    #[tokio::test]
    async fn stale_check_in_reports_already_checked_in() {
        let store = InMemoryStore::new();
        let ticket = stored_ticket(&store, TicketStatus::Confirmed).await;

        let (_, first) = apply_transition(&store, ticket.clone(), |t| t.check_in())
            .await
            .unwrap();
        let result = apply_transition(&store, ticket, |t| t.check_in()).await;

        assert_eq!(
            result.map(|(_, at)| at),
            Err(TicketError::AlreadyCheckedIn {
                used_at: Some(first)
            })
        );
    }

    #[tokio::test]
    async fn domain_error_short_circuits_before_write() {
        let store = InMemoryStore::new();
        let ticket = stored_ticket(&store, TicketStatus::Pending).await;

        let result = apply_transition(&store, ticket.clone(), |t| t.check_in()).await;
        assert!(matches!(result, Err(TicketError::NotConfirmed { .. })));

        let stored = store.find_by_id(&ticket.id).await.unwrap().unwrap();
        assert_eq!(stored.status, TicketStatus::Pending);
    }
}
