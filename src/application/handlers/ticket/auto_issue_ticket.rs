//! AutoIssueTicketHandler - system-initiated ticket for a user who joined.
//!
//! Always issues a confirmed ticket, even for events that require
//! approval: joining already passed the capacity check. An existing live
//! ticket is returned unchanged.

use std::sync::Arc;

use crate::domain::event::Event;
use crate::domain::foundation::UserId;
use crate::domain::ticket::{Ticket, TicketError, TicketStatus};

use super::{Issuance, TicketIssuer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoIssueTicketResult {
    pub ticket: Ticket,
    /// False when the user already held a live ticket.
    pub created: bool,
}

pub struct AutoIssueTicketHandler {
    issuer: Arc<TicketIssuer>,
}

impl AutoIssueTicketHandler {
    pub fn new(issuer: Arc<TicketIssuer>) -> Self {
        Self { issuer }
    }

    pub async fn handle(
        &self,
        event: &Event,
        user_id: &UserId,
    ) -> Result<AutoIssueTicketResult, TicketError> {
        if !event.ticketing.is_enabled() {
            return Err(TicketError::ticketing_disabled(event.id));
        }

        match self
            .issuer
            .issue(event, user_id, TicketStatus::Confirmed)
            .await?
        {
            Issuance::Issued(ticket) => Ok(AutoIssueTicketResult {
                ticket,
                created: true,
            }),
            Issuance::Existing(ticket) => {
                tracing::info!(
                    event_id = %event.id,
                    user_id = %user_id,
                    ticket_number = %ticket.ticket_number,
                    "User already holds a ticket, nothing issued"
                );
                Ok(AutoIssueTicketResult {
                    ticket,
                    created: false,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{event_with, issuer, ticketing, user};
    use crate::domain::event::TicketingPolicy;

    fn handler(store: &InMemoryStore) -> AutoIssueTicketHandler {
        AutoIssueTicketHandler::new(Arc::new(issuer(store, None)))
    }

    #[tokio::test]
    async fn bypasses_approval() {
        let store = InMemoryStore::new();
        let event = event_with(&store, 5, ticketing(true)).await;

        let result = handler(&store).handle(&event, &user("a")).await.unwrap();

        assert!(result.created);
        assert_eq!(result.ticket.status, TicketStatus::Confirmed);
    }

    #[tokio::test]
    async fn returns_existing_ticket_idempotently() {
        let store = InMemoryStore::new();
        let event = event_with(&store, 5, ticketing(false)).await;
        let handler = handler(&store);

        let first = handler.handle(&event, &user("a")).await.unwrap();
        let second = handler.handle(&event, &user("a")).await.unwrap();

        assert!(!second.created);
        assert_eq!(second.ticket.id, first.ticket.id);
        assert_eq!(store.ticket_count().await, 1);
    }

    #[tokio::test]
    async fn fails_when_ticketing_disabled() {
        let store = InMemoryStore::new();
        let event = event_with(&store, 5, TicketingPolicy::Disabled).await;

        let result = handler(&store).handle(&event, &user("a")).await;
        assert_eq!(result.unwrap_err(), TicketError::ticketing_disabled(event.id));
    }

    #[tokio::test]
    async fn confirmed_ticket_without_renderer_awaits_artifact() {
        let store = InMemoryStore::new();
        let event = event_with(&store, 5, ticketing(false)).await;

        let result = handler(&store).handle(&event, &user("a")).await.unwrap();
        assert!(result.ticket.awaiting_artifact());
    }
}
