//! Attendance command and query handlers.

mod get_attendees;
mod join_event;
mod leave_event;
mod list_joined_events;

pub use get_attendees::{EventAttendees, GetAttendeesHandler, GetAttendeesQuery};
pub use join_event::{JoinEventCommand, JoinEventHandler, JoinEventResult, TicketOutcome};
pub use leave_event::{LeaveEventCommand, LeaveEventHandler, LeaveEventResult};
pub use list_joined_events::ListJoinedEventsHandler;
