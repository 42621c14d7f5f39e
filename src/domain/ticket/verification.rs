//! Read-only validity report for a presented ticket.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::TicketStatus;

/// Whether a ticket admits its holder, and if not, why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "validity", rename_all = "snake_case")]
pub enum TicketValidity {
    Valid,
    Used { used_at: Option<Timestamp> },
    Revoked {
        reason: Option<String>,
        revoked_at: Option<Timestamp>,
    },
    NotConfirmed { status: TicketStatus },
}

impl TicketValidity {
    pub fn is_valid(&self) -> bool {
        matches!(self, TicketValidity::Valid)
    }

    /// Short human-readable explanation.
    pub fn reason(&self) -> String {
        match self {
            TicketValidity::Valid => "Ticket is valid".to_string(),
            TicketValidity::Used { used_at: Some(at) } => {
                format!("Ticket was already used at {}", at.to_rfc3339())
            }
            TicketValidity::Used { used_at: None } => "Ticket was already used".to_string(),
            TicketValidity::Revoked {
                reason: Some(reason),
                ..
            } => format!("Ticket was revoked: {}", reason),
            TicketValidity::Revoked { reason: None, .. } => "Ticket was revoked".to_string(),
            TicketValidity::NotConfirmed { status } => {
                format!("Ticket is not confirmed (status: {})", status)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_valid_is_valid() {
        assert!(TicketValidity::Valid.is_valid());
        assert!(!TicketValidity::NotConfirmed {
            status: TicketStatus::Pending
        }
        .is_valid());
    }

    #[test]
    fn revoked_reason_mentions_cause() {
        let validity = TicketValidity::Revoked {
            reason: Some("Duplicate booking".to_string()),
            revoked_at: None,
        };
        assert_eq!(validity.reason(), "Ticket was revoked: Duplicate booking");
    }

    #[test]
    fn not_confirmed_names_status() {
        let validity = TicketValidity::NotConfirmed {
            status: TicketStatus::Cancelled,
        };
        assert!(validity.reason().contains("cancelled"));
    }
}
