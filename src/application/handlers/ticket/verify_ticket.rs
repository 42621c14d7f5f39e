//! VerifyTicketHandler - read-only validity check at the door.

use std::sync::Arc;

use crate::domain::ticket::{
    Ticket, TicketCredentialGenerator, TicketError, TicketNumber, TicketValidity,
    VerificationToken,
};
use crate::ports::TicketRepository;

/// How the ticket was presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketReference {
    /// Human-readable number typed in or read out.
    Number(String),
    /// Token scanned from the QR code.
    Token(String),
}

#[derive(Debug, Clone)]
pub struct VerifyTicketQuery {
    pub reference: TicketReference,
}

#[derive(Debug, Clone)]
pub struct VerifyTicketResult {
    pub ticket: Ticket,
    pub validity: TicketValidity,
}

pub struct VerifyTicketHandler {
    tickets: Arc<dyn TicketRepository>,
    credentials: Arc<dyn TicketCredentialGenerator>,
}

impl VerifyTicketHandler {
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        credentials: Arc<dyn TicketCredentialGenerator>,
    ) -> Self {
        Self {
            tickets,
            credentials,
        }
    }

    pub async fn handle(&self, query: VerifyTicketQuery) -> Result<VerifyTicketResult, TicketError> {
        let ticket = match &query.reference {
            TicketReference::Number(raw) => {
                let number =
                    TicketNumber::new(raw).map_err(|_| TicketError::not_found(raw.clone()))?;
                self.tickets
                    .find_by_number(&number)
                    .await?
                    .ok_or_else(|| TicketError::not_found(raw.clone()))?
            }
            TicketReference::Token(raw) => {
                let token = VerificationToken::new(raw)
                    .map_err(|_| TicketError::not_found("presented token"))?;
                let ticket = self
                    .tickets
                    .find_by_token(&token)
                    .await?
                    .ok_or_else(|| TicketError::not_found("presented token"))?;
                if !self
                    .credentials
                    .authenticate(&ticket.ticket_number, &token)
                {
                    tracing::warn!(
                        ticket_number = %ticket.ticket_number,
                        "Stored token failed authentication"
                    );
                    return Err(TicketError::not_found("presented token"));
                }
                ticket
            }
        };

        let validity = ticket.validity();
        tracing::debug!(
            ticket_number = %ticket.ticket_number,
            valid = validity.is_valid(),
            "Ticket verified"
        );

        Ok(VerifyTicketResult { ticket, validity })
    }
}
