//! CheckInTicketHandler - door staff mark a confirmed ticket as used.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::ticket::{Ticket, TicketError, TicketNumber};
use crate::ports::TicketRepository;

use super::transition::apply_transition;

#[derive(Debug, Clone)]
pub struct CheckInTicketCommand {
    pub ticket_number: String,
}

#[derive(Debug, Clone)]
pub struct CheckInTicketResult {
    pub ticket: Ticket,
    pub used_at: Timestamp,
}

pub struct CheckInTicketHandler {
    tickets: Arc<dyn TicketRepository>,
}

impl CheckInTicketHandler {
    pub fn new(tickets: Arc<dyn TicketRepository>) -> Self {
        Self { tickets }
    }

    pub async fn handle(
        &self,
        cmd: CheckInTicketCommand,
    ) -> Result<CheckInTicketResult, TicketError> {
        let number = TicketNumber::new(&cmd.ticket_number)
            .map_err(|_| TicketError::not_found(cmd.ticket_number.clone()))?;
        let ticket = self
            .tickets
            .find_by_number(&number)
            .await?
            .ok_or_else(|| TicketError::not_found(number.to_string()))?;

        let (ticket, used_at) =
            apply_transition(self.tickets.as_ref(), ticket, |t| t.check_in()).await?;

        tracing::info!(
            event_id = %ticket.event_id,
            ticket_number = %ticket.ticket_number,
            "Ticket checked in"
        );

        Ok(CheckInTicketResult { ticket, used_at })
    }
}
