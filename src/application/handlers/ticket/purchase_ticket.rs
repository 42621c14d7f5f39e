//! PurchaseTicketHandler - a user requests a ticket for an event.

use std::sync::Arc;

use crate::domain::foundation::{EventId, UserId};
use crate::domain::ticket::{Ticket, TicketError, TicketStatus};
use crate::ports::EventReader;

use super::{Issuance, TicketIssuer};

#[derive(Debug, Clone)]
pub struct PurchaseTicketCommand {
    pub event_id: EventId,
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct PurchaseTicketResult {
    /// Pending when the event requires approval, confirmed otherwise.
    pub ticket: Ticket,
}

pub struct PurchaseTicketHandler {
    events: Arc<dyn EventReader>,
    issuer: Arc<TicketIssuer>,
}

impl PurchaseTicketHandler {
    pub fn new(events: Arc<dyn EventReader>, issuer: Arc<TicketIssuer>) -> Self {
        Self { events, issuer }
    }

    pub async fn handle(
        &self,
        cmd: PurchaseTicketCommand,
    ) -> Result<PurchaseTicketResult, TicketError> {
        // 1. Load event
        let event = self
            .events
            .find_event(&cmd.event_id)
            .await?
            .ok_or_else(|| TicketError::event_not_found(cmd.event_id))?;

        // 2. Ticketing must be on
        if !event.ticketing.is_enabled() {
            return Err(TicketError::ticketing_disabled(event.id));
        }

        // 3. Issue under the event's approval rule
        let initial = TicketStatus::initial(event.ticketing.requires_approval());
        match self.issuer.issue(&event, &cmd.user_id, initial).await? {
            Issuance::Issued(ticket) => Ok(PurchaseTicketResult { ticket }),
            Issuance::Existing(_) => Err(TicketError::already_has_ticket(event.id, cmd.user_id)),
        }
    }
}
