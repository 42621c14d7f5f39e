//! HTTP DTOs for ticket endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::ticket::{
    CheckInTicketResult, EventTickets, ReviewTicketResult, TicketSummary, VerifyTicketResult,
};
use crate::domain::ticket::{Ticket, TicketStatus};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Organizer decision on a pending ticket.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewTicketRequest {
    /// `approve` or `reject`.
    pub action: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RevokeTicketRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A ticket as shown to its holder or the event organizer.
#[derive(Debug, Clone, Serialize)]
pub struct TicketResponse {
    pub id: String,
    pub ticket_number: String,
    /// QR payload token.
    pub verification_token: String,
    pub event_id: String,
    pub user_id: String,
    pub status: TicketStatus,
    pub purchased_at: String,
    pub used_at: Option<String>,
    pub revoked_at: Option<String>,
    pub revoked_reason: Option<String>,
    pub artifact_url: Option<String>,
    /// Confirmed but the document has not been rendered yet.
    pub artifact_pending: bool,
}

impl From<&Ticket> for TicketResponse {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id.to_string(),
            ticket_number: ticket.ticket_number.to_string(),
            verification_token: ticket.verification_token.as_str().to_string(),
            event_id: ticket.event_id.to_string(),
            user_id: ticket.user_id.to_string(),
            status: ticket.status,
            purchased_at: ticket.purchased_at.to_rfc3339(),
            used_at: ticket.used_at.map(|t| t.to_rfc3339()),
            revoked_at: ticket.revoked_at.map(|t| t.to_rfc3339()),
            revoked_reason: ticket.revoked_reason.clone(),
            artifact_url: ticket.artifact.as_ref().map(|a| a.as_str().to_string()),
            artifact_pending: ticket.awaiting_artifact(),
        }
    }
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self::from(&ticket)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketListResponse {
    pub count: usize,
    pub tickets: Vec<TicketResponse>,
}

impl From<Vec<Ticket>> for TicketListResponse {
    fn from(tickets: Vec<Ticket>) -> Self {
        Self {
            count: tickets.len(),
            tickets: tickets.iter().map(TicketResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventTicketsResponse {
    pub summary: TicketSummary,
    pub tickets: Vec<TicketResponse>,
}

impl From<EventTickets> for EventTicketsResponse {
    fn from(result: EventTickets) -> Self {
        Self {
            summary: result.summary,
            tickets: result.tickets.iter().map(TicketResponse::from).collect(),
        }
    }
}

/// Door-check view. Omits the verification token.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyTicketResponse {
    pub valid: bool,
    /// Why the ticket is not admissible; absent when valid.
    pub reason: Option<String>,
    pub ticket_number: String,
    pub event_id: String,
    pub user_id: String,
    pub status: TicketStatus,
    pub used_at: Option<String>,
    pub revoked_at: Option<String>,
    pub revoked_reason: Option<String>,
}

impl From<VerifyTicketResult> for VerifyTicketResponse {
    fn from(result: VerifyTicketResult) -> Self {
        let ticket = result.ticket;
        let valid = result.validity.is_valid();
        Self {
            valid,
            reason: (!valid).then(|| result.validity.reason()),
            ticket_number: ticket.ticket_number.to_string(),
            event_id: ticket.event_id.to_string(),
            user_id: ticket.user_id.to_string(),
            status: ticket.status,
            used_at: ticket.used_at.map(|t| t.to_rfc3339()),
            revoked_at: ticket.revoked_at.map(|t| t.to_rfc3339()),
            revoked_reason: ticket.revoked_reason,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckInResponse {
    pub ticket: TicketResponse,
    pub used_at: String,
}

impl From<CheckInTicketResult> for CheckInResponse {
    fn from(result: CheckInTicketResult) -> Self {
        Self {
            ticket: TicketResponse::from(&result.ticket),
            used_at: result.used_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewTicketResponse {
    pub action: &'static str,
    pub ticket: TicketResponse,
}

impl From<ReviewTicketResult> for ReviewTicketResponse {
    fn from(result: ReviewTicketResult) -> Self {
        Self {
            action: result.action.as_str(),
            ticket: TicketResponse::from(&result.ticket),
        }
    }
}
