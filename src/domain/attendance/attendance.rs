//! Attendance record: a user holding a place at an event.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, Timestamp, UserId};

/// At most one record exists per (event, user). Created on join and
/// removed on leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub event_id: EventId,
    pub user_id: UserId,
    pub joined_at: Timestamp,
    pub rsvp: bool,
}

impl Attendance {
    /// A fresh record for a user joining now. Joining implies an RSVP.
    pub fn join(event_id: EventId, user_id: UserId) -> Self {
        Self {
            event_id,
            user_id,
            joined_at: Timestamp::now(),
            rsvp: true,
        }
    }
}
