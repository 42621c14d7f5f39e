//! What happens to a user's ticket when they leave an event.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::ticket::TicketStatus;

/// Reason recorded on tickets revoked because their holder left.
pub const LEFT_EVENT_REVOKE_REASON: &str = "Attendee left the event";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeavePolicy {
    /// The ticket outlives the attendance record.
    #[default]
    KeepTicket,
    /// Pending and confirmed tickets are revoked. Used tickets are kept.
    RevokeLiveTicket,
}

impl LeavePolicy {
    /// Whether a ticket in `status` should be revoked when its holder leaves.
    pub fn revokes(&self, status: TicketStatus) -> bool {
        match self {
            LeavePolicy::KeepTicket => false,
            LeavePolicy::RevokeLiveTicket => {
                matches!(status, TicketStatus::Pending | TicketStatus::Confirmed)
            }
        }
    }
}

impl fmt::Display for LeavePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeavePolicy::KeepTicket => write!(f, "keep_ticket"),
            LeavePolicy::RevokeLiveTicket => write!(f, "revoke_live_ticket"),
        }
    }
}

impl FromStr for LeavePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep_ticket" => Ok(LeavePolicy::KeepTicket),
            "revoke_live_ticket" => Ok(LeavePolicy::RevokeLiveTicket),
            other => Err(format!("unknown leave policy '{}'", other)),
        }
    }
}
