//! HTTP DTOs for attendance endpoints.

use serde::Serialize;

use crate::application::handlers::attendance::{
    EventAttendees, JoinEventResult, LeaveEventResult, TicketOutcome,
};
use crate::domain::attendance::Attendance;
use crate::ports::JoinedEventView;

use super::super::tickets::dto::TicketResponse;

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceResponse {
    pub event_id: String,
    pub user_id: String,
    pub joined_at: String,
    pub rsvp: bool,
}

impl From<&Attendance> for AttendanceResponse {
    fn from(attendance: &Attendance) -> Self {
        Self {
            event_id: attendance.event_id.to_string(),
            user_id: attendance.user_id.to_string(),
            joined_at: attendance.joined_at.to_rfc3339(),
            rsvp: attendance.rsvp,
        }
    }
}

/// Ticket side of a join, flattened for clients.
#[derive(Debug, Clone, Serialize)]
pub struct JoinTicketResponse {
    /// `not_applicable`, `issued`, `existing` or `failed`.
    pub outcome: &'static str,
    pub ticket: Option<TicketResponse>,
    /// Present when `outcome` is `failed`.
    pub error: Option<String>,
}

impl From<&TicketOutcome> for JoinTicketResponse {
    fn from(outcome: &TicketOutcome) -> Self {
        match outcome {
            TicketOutcome::NotApplicable => Self {
                outcome: "not_applicable",
                ticket: None,
                error: None,
            },
            TicketOutcome::Issued(ticket) => Self {
                outcome: "issued",
                ticket: Some(TicketResponse::from(ticket)),
                error: None,
            },
            TicketOutcome::Existing(ticket) => Self {
                outcome: "existing",
                ticket: Some(TicketResponse::from(ticket)),
                error: None,
            },
            TicketOutcome::Failed { reason } => Self {
                outcome: "failed",
                ticket: None,
                error: Some(reason.clone()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinEventResponse {
    pub message: &'static str,
    pub attendance: AttendanceResponse,
    pub ticket: JoinTicketResponse,
    pub organizer_notified: bool,
}

impl From<JoinEventResult> for JoinEventResponse {
    fn from(result: JoinEventResult) -> Self {
        Self {
            message: "Joined event",
            attendance: AttendanceResponse::from(&result.attendance),
            ticket: JoinTicketResponse::from(&result.ticket),
            organizer_notified: result.organizer_notified,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaveEventResponse {
    pub message: &'static str,
    pub organizer_notified: bool,
    pub revoked_ticket: Option<TicketResponse>,
}

impl From<LeaveEventResult> for LeaveEventResponse {
    fn from(result: LeaveEventResult) -> Self {
        Self {
            message: "Left event",
            organizer_notified: result.organizer_notified,
            revoked_ticket: result.revoked_ticket.as_ref().map(TicketResponse::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendeeResponse {
    pub user_id: String,
    pub full_name: String,
    /// Shown to the organizer only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub joined_at: String,
    pub rsvp: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendeesResponse {
    pub count: usize,
    pub attendees: Vec<AttendeeResponse>,
}

impl From<EventAttendees> for AttendeesResponse {
    fn from(result: EventAttendees) -> Self {
        let show_email = result.viewer_is_organizer;
        let attendees: Vec<AttendeeResponse> = result
            .attendees
            .into_iter()
            .map(|a| AttendeeResponse {
                user_id: a.user_id.to_string(),
                full_name: a.full_name,
                email: show_email.then_some(a.email),
                joined_at: a.joined_at.to_rfc3339(),
                rsvp: a.rsvp,
            })
            .collect();
        Self {
            count: attendees.len(),
            attendees,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinedEventResponse {
    pub event_id: String,
    pub event_name: String,
    pub location: String,
    pub starts_at: String,
    pub joined_at: String,
    pub rsvp: bool,
}

impl From<JoinedEventView> for JoinedEventResponse {
    fn from(view: JoinedEventView) -> Self {
        Self {
            event_id: view.event_id.to_string(),
            event_name: view.event_name,
            location: view.location,
            starts_at: view.starts_at.to_rfc3339(),
            joined_at: view.joined_at.to_rfc3339(),
            rsvp: view.rsvp,
        }
    }
}
