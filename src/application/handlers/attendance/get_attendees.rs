//! GetAttendeesHandler - who is coming to an event.

use std::sync::Arc;

use crate::domain::attendance::AttendanceError;
use crate::domain::foundation::{EventId, UserId};
use crate::ports::{AttendanceRepository, AttendeeView, EventReader};

#[derive(Debug, Clone)]
pub struct GetAttendeesQuery {
    pub event_id: EventId,
    pub viewer: UserId,
}

#[derive(Debug, Clone)]
pub struct EventAttendees {
    /// Earliest joiner first.
    pub attendees: Vec<AttendeeView>,
    /// Whether the viewer organizes the event; callers hide emails otherwise.
    pub viewer_is_organizer: bool,
}

pub struct GetAttendeesHandler {
    events: Arc<dyn EventReader>,
    attendance: Arc<dyn AttendanceRepository>,
}

impl GetAttendeesHandler {
    pub fn new(events: Arc<dyn EventReader>, attendance: Arc<dyn AttendanceRepository>) -> Self {
        Self { events, attendance }
    }

    pub async fn handle(&self, query: GetAttendeesQuery) -> Result<EventAttendees, AttendanceError> {
        let event = self
            .events
            .find_event(&query.event_id)
            .await?
            .ok_or_else(|| AttendanceError::event_not_found(query.event_id))?;

        let attendees = self.attendance.list_attendees(&event.id).await?;

        Ok(EventAttendees {
            attendees,
            viewer_is_organizer: event.is_organized_by(&query.viewer),
        })
    }
}
