//! Organizer-facing notifications.
//!
//! Notifications are a side channel: recording one never gates the
//! attendance or ticket change that produced it.

use serde::{Deserialize, Serialize};

use crate::domain::event::Event;
use crate::domain::foundation::{EventId, NotificationId, Timestamp, UserId};
use crate::domain::user::UserProfile;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: UserId,
    pub event_id: EventId,
    pub message: String,
    pub created_at: Timestamp,
}

impl Notification {
    pub fn new(recipient_id: UserId, event_id: EventId, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            recipient_id,
            event_id,
            message: message.into(),
            created_at: Timestamp::now(),
        }
    }

    /// "<name> has joined your event: <event>", addressed to the organizer.
    pub fn attendee_joined(event: &Event, attendee: &UserProfile) -> Self {
        Self::new(
            event.organizer_id.clone(),
            event.id,
            format!("{} has joined your event: {}", attendee.display_name(), event.name),
        )
    }

    /// "<name> has left your event: <event>", addressed to the organizer.
    pub fn attendee_left(event: &Event, attendee: &UserProfile) -> Self {
        Self::new(
            event.organizer_id.clone(),
            event.id,
            format!("{} has left your event: {}", attendee.display_name(), event.name),
        )
    }
}
