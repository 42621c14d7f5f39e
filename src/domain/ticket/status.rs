//! Ticket status state machine.
//!
//! ```text
//! pending ──approve──► confirmed ──check-in──► used
//!   │  └──reject──► cancelled      │
//!   └───revoke───► revoked ◄──revoke┘
//! ```
//!
//! `used`, `revoked` and `cancelled` are terminal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Issued for an event that requires approval; holds no seat yet.
    Pending,
    /// Valid for entry. Holds a seat.
    Confirmed,
    /// Checked in at the door. Still holds a seat.
    Used,
    /// Withdrawn by the organizer or by leaving the event.
    Revoked,
    /// Rejected during approval.
    Cancelled,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 5] = [
        TicketStatus::Pending,
        TicketStatus::Confirmed,
        TicketStatus::Used,
        TicketStatus::Revoked,
        TicketStatus::Cancelled,
    ];

    /// Status a freshly issued ticket is born with.
    pub fn initial(requires_approval: bool) -> Self {
        if requires_approval {
            TicketStatus::Pending
        } else {
            TicketStatus::Confirmed
        }
    }

    /// Live tickets block a second ticket for the same (event, user).
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            TicketStatus::Pending | TicketStatus::Confirmed | TicketStatus::Used
        )
    }

    /// Tickets in these states count against event capacity.
    pub fn consumes_capacity(&self) -> bool {
        matches!(self, TicketStatus::Confirmed | TicketStatus::Used)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Pending => "pending",
            TicketStatus::Confirmed => "confirmed",
            TicketStatus::Used => "used",
            TicketStatus::Revoked => "revoked",
            TicketStatus::Cancelled => "cancelled",
        }
    }
}

impl StateMachine for TicketStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use TicketStatus::*;
        matches!(
            (self, target),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Pending, Revoked)
                | (Confirmed, Used)
                | (Confirmed, Revoked)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use TicketStatus::*;
        match self {
            Pending => vec![Confirmed, Cancelled, Revoked],
            Confirmed => vec![Used, Revoked],
            Used | Revoked | Cancelled => vec![],
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TicketStatus::Pending),
            "confirmed" => Ok(TicketStatus::Confirmed),
            "used" => Ok(TicketStatus::Used),
            "revoked" => Ok(TicketStatus::Revoked),
            "cancelled" => Ok(TicketStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "ticket_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}
