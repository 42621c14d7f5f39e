//! Ticket listings: a holder's own tickets and an organizer's event view.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::{EventId, UserId};
use crate::domain::ticket::{Ticket, TicketError, TicketStatus};
use crate::ports::{EventReader, TicketRepository};

/// Per-status ticket counts for one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TicketSummary {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub used: usize,
    pub revoked: usize,
    pub cancelled: usize,
}

impl TicketSummary {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        tickets.iter().fold(Self::default(), |mut summary, ticket| {
            summary.total += 1;
            match ticket.status {
                TicketStatus::Pending => summary.pending += 1,
                TicketStatus::Confirmed => summary.confirmed += 1,
                TicketStatus::Used => summary.used += 1,
                TicketStatus::Revoked => summary.revoked += 1,
                TicketStatus::Cancelled => summary.cancelled += 1,
            }
            summary
        })
    }
}

pub struct ListUserTicketsHandler {
    tickets: Arc<dyn TicketRepository>,
}

impl ListUserTicketsHandler {
    pub fn new(tickets: Arc<dyn TicketRepository>) -> Self {
        Self { tickets }
    }

    /// The holder's tickets, newest first.
    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<Ticket>, TicketError> {
        Ok(self.tickets.list_for_user(user_id).await?)
    }
}

#[derive(Debug, Clone)]
pub struct ListEventTicketsQuery {
    pub event_id: EventId,
    pub requested_by: UserId,
}

#[derive(Debug, Clone)]
pub struct EventTickets {
    pub tickets: Vec<Ticket>,
    pub summary: TicketSummary,
}

pub struct ListEventTicketsHandler {
    events: Arc<dyn EventReader>,
    tickets: Arc<dyn TicketRepository>,
}

impl ListEventTicketsHandler {
    pub fn new(events: Arc<dyn EventReader>, tickets: Arc<dyn TicketRepository>) -> Self {
        Self { events, tickets }
    }

    pub async fn handle(&self, query: ListEventTicketsQuery) -> Result<EventTickets, TicketError> {
        let event = self
            .events
            .find_event(&query.event_id)
            .await?
            .ok_or_else(|| TicketError::event_not_found(query.event_id))?;

        if !event.is_organized_by(&query.requested_by) {
            return Err(TicketError::forbidden(
                "Only the event organizer can list its tickets",
            ));
        }

        let tickets = self.tickets.list_for_event(&event.id).await?;
        let summary = TicketSummary::from_tickets(&tickets);
        Ok(EventTickets { tickets, summary })
    }
}
