//! RevokeTicketHandler - organizer withdraws a pending or confirmed ticket.

use std::sync::Arc;

use crate::domain::foundation::{TicketId, UserId};
use crate::domain::ticket::{Ticket, TicketError};
use crate::ports::{EventReader, TicketRepository};

use super::transition::apply_transition;

/// Reason recorded when the organizer gives none.
pub const DEFAULT_REVOKE_REASON: &str = "Revoked by organizer";

#[derive(Debug, Clone)]
pub struct RevokeTicketCommand {
    pub ticket_id: TicketId,
    pub revoked_by: UserId,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RevokeTicketResult {
    pub ticket: Ticket,
}

pub struct RevokeTicketHandler {
    events: Arc<dyn EventReader>,
    tickets: Arc<dyn TicketRepository>,
}

impl RevokeTicketHandler {
    pub fn new(events: Arc<dyn EventReader>, tickets: Arc<dyn TicketRepository>) -> Self {
        Self { events, tickets }
    }

    pub async fn handle(&self, cmd: RevokeTicketCommand) -> Result<RevokeTicketResult, TicketError> {
        let ticket = self
            .tickets
            .find_by_id(&cmd.ticket_id)
            .await?
            .ok_or_else(|| TicketError::not_found(cmd.ticket_id.to_string()))?;
        let event = self
            .events
            .find_event(&ticket.event_id)
            .await?
            .ok_or_else(|| TicketError::event_not_found(ticket.event_id))?;

        if !event.is_organized_by(&cmd.revoked_by) {
            return Err(TicketError::forbidden(
                "Only the event organizer can revoke tickets",
            ));
        }

        let reason = cmd
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REVOKE_REASON.to_string());

        let (ticket, ()) =
            apply_transition(self.tickets.as_ref(), ticket, |t| t.revoke(reason.clone())).await?;

        tracing::info!(
            event_id = %event.id,
            ticket_number = %ticket.ticket_number,
            reason = %reason,
            "Ticket revoked"
        );

        Ok(RevokeTicketResult { ticket })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{
        event_with, issuer, ticketing, user, ORGANIZER,
    };
    use crate::application::handlers::ticket::{
        CheckInTicketCommand, CheckInTicketHandler, PurchaseTicketCommand, PurchaseTicketHandler,
    };
    use crate::domain::ticket::TicketStatus;

    async fn purchased(store: &InMemoryStore, requires_approval: bool) -> Ticket {
        let event = event_with(store, 10, ticketing(requires_approval)).await;
        PurchaseTicketHandler::new(Arc::new(store.clone()), Arc::new(issuer(store, None)))
            .handle(PurchaseTicketCommand {
                event_id: event.id,
                user_id: user("holder"),
            })
            .await
            .unwrap()
            .ticket
    }

    fn handler(store: &InMemoryStore) -> RevokeTicketHandler {
        RevokeTicketHandler::new(Arc::new(store.clone()), Arc::new(store.clone()))
    }

    fn revoke(ticket: &Ticket, reason: Option<&str>) -> RevokeTicketCommand {
        RevokeTicketCommand {
            ticket_id: ticket.id,
            revoked_by: user(ORGANIZER),
            reason: reason.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn revokes_pending_ticket_with_default_reason() {
        let store = InMemoryStore::new();
        let ticket = purchased(&store, true).await;

        let result = handler(&store).handle(revoke(&ticket, None)).await.unwrap();

        assert_eq!(result.ticket.status, TicketStatus::Revoked);
        assert_eq!(
            result.ticket.revoked_reason.as_deref(),
            Some(DEFAULT_REVOKE_REASON)
        );
    }

    #[tokio::test]
    async fn blank_reason_falls_back_to_default() {
        let store = InMemoryStore::new();
        let ticket = purchased(&store, false).await;

        let result = handler(&store)
            .handle(revoke(&ticket, Some("   ")))
            .await
            .unwrap();
        assert_eq!(
            result.ticket.revoked_reason.as_deref(),
            Some(DEFAULT_REVOKE_REASON)
        );
    }

    #[tokio::test]
    async fn fails_when_already_revoked() {
        let store = InMemoryStore::new();
        let ticket = purchased(&store, false).await;
        let handler = handler(&store);

        handler.handle(revoke(&ticket, Some("spam"))).await.unwrap();
        let result = handler.handle(revoke(&ticket, Some("again"))).await;

        assert_eq!(result.unwrap_err(), TicketError::AlreadyRevoked);
    }

    #[tokio::test]
    async fn fails_when_used() {
        let store = InMemoryStore::new();
        let ticket = purchased(&store, false).await;
        CheckInTicketHandler::new(Arc::new(store.clone()))
            .handle(CheckInTicketCommand {
                ticket_number: ticket.ticket_number.to_string(),
            })
            .await
            .unwrap();

        let result = handler(&store).handle(revoke(&ticket, None)).await;
        assert!(matches!(result, Err(TicketError::AlreadyUsed { .. })));
    }

    #[tokio::test]
    async fn fails_for_non_organizer() {
        let store = InMemoryStore::new();
        let ticket = purchased(&store, false).await;

        let result = handler(&store)
            .handle(RevokeTicketCommand {
                ticket_id: ticket.id,
                revoked_by: user("holder"),
                reason: None,
            })
            .await;
        assert!(matches!(result, Err(TicketError::Forbidden(_))));
    }
}
