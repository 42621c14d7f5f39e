//! ReviewTicketHandler - organizer approves or rejects a pending ticket.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::foundation::{TicketId, UserId};
use crate::domain::ticket::{Ticket, TicketError, TicketStatus};
use crate::ports::{EventReader, TicketRepository};

use super::transition::{apply_confirmation, apply_transition};
use super::TicketIssuer;

/// Organizer decision on a pending ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
        }
    }
}

impl FromStr for ReviewAction {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(ReviewAction::Approve),
            "reject" => Ok(ReviewAction::Reject),
            other => Err(TicketError::invalid_action(other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewTicketCommand {
    pub ticket_id: TicketId,
    pub reviewer: UserId,
    /// Raw action as received; anything but approve/reject is refused.
    pub action: String,
}

#[derive(Debug, Clone)]
pub struct ReviewTicketResult {
    pub ticket: Ticket,
    pub action: ReviewAction,
}

pub struct ReviewTicketHandler {
    events: Arc<dyn EventReader>,
    tickets: Arc<dyn TicketRepository>,
    issuer: Arc<TicketIssuer>,
}

impl ReviewTicketHandler {
    pub fn new(
        events: Arc<dyn EventReader>,
        tickets: Arc<dyn TicketRepository>,
        issuer: Arc<TicketIssuer>,
    ) -> Self {
        Self {
            events,
            tickets,
            issuer,
        }
    }

    pub async fn handle(&self, cmd: ReviewTicketCommand) -> Result<ReviewTicketResult, TicketError> {
        // 1. Load ticket and its event
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

        // 2. Only the organizer reviews
        if !event.is_organized_by(&cmd.reviewer) {
            return Err(TicketError::forbidden(
                "Only the event organizer can review tickets",
            ));
        }

        // 3. Only pending tickets are reviewed
        if ticket.status != TicketStatus::Pending {
            return Err(TicketError::not_pending(ticket.status));
        }
        let action: ReviewAction = cmd.action.parse()?;

        // 4. Apply the decision
        let ticket = match action {
            ReviewAction::Approve => {
                let (mut ticket, ()) =
                    apply_confirmation(self.tickets.as_ref(), &event, ticket, |t| t.approve())
                        .await?;
                self.issuer.render_artifact(&mut ticket, &event).await;
                ticket
            }
            ReviewAction::Reject => {
                let (ticket, ()) =
                    apply_transition(self.tickets.as_ref(), ticket, |t| t.reject()).await?;
                ticket
            }
        };

        tracing::info!(
            event_id = %event.id,
            ticket_number = %ticket.ticket_number,
            status = %ticket.status,
            "Ticket reviewed"
        );

        Ok(ReviewTicketResult { ticket, action })
    }
}
