//! LeaveEventHandler - a user gives up their seat.

use std::sync::Arc;

use crate::application::handlers::ticket::transition::apply_transition;
use crate::application::NotificationEmitter;
use crate::domain::attendance::{AttendanceError, LeavePolicy, LEFT_EVENT_REVOKE_REASON};
use crate::domain::event::Event;
use crate::domain::foundation::{EventId, UserId};
use crate::domain::notification::Notification;
use crate::domain::ticket::Ticket;
use crate::domain::user::UserProfile;
use crate::ports::{AttendanceRepository, EventReader, TicketRepository, UserDirectory};

#[derive(Debug, Clone)]
pub struct LeaveEventCommand {
    pub event_id: EventId,
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct LeaveEventResult {
    pub organizer_notified: bool,
    /// Ticket revoked under [`LeavePolicy::RevokeLiveTicket`].
    pub revoked_ticket: Option<Ticket>,
}

pub struct LeaveEventHandler {
    events: Arc<dyn EventReader>,
    users: Arc<dyn UserDirectory>,
    attendance: Arc<dyn AttendanceRepository>,
    tickets: Arc<dyn TicketRepository>,
    notifier: Arc<NotificationEmitter>,
    policy: LeavePolicy,
}

impl LeaveEventHandler {
    pub fn new(
        events: Arc<dyn EventReader>,
        users: Arc<dyn UserDirectory>,
        attendance: Arc<dyn AttendanceRepository>,
        tickets: Arc<dyn TicketRepository>,
        notifier: Arc<NotificationEmitter>,
        policy: LeavePolicy,
    ) -> Self {
        Self {
            events,
            users,
            attendance,
            tickets,
            notifier,
            policy,
        }
    }

    pub async fn handle(&self, cmd: LeaveEventCommand) -> Result<LeaveEventResult, AttendanceError> {
        // 1. Event must exist
        let event = self
            .events
            .find_event(&cmd.event_id)
            .await?
            .ok_or_else(|| AttendanceError::event_not_found(cmd.event_id))?;

        // 2. User must be attending
        if self.attendance.find(&event.id, &cmd.user_id).await?.is_none() {
            return Err(AttendanceError::not_attending(event.id, cmd.user_id));
        }

        // 3. Notify while the leaver's identity is still at hand
        let profile = match self.users.find_profile(&cmd.user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => UserProfile::new(cmd.user_id.clone(), "", ""),
            Err(e) => {
                tracing::warn!(error = %e, user_id = %cmd.user_id, "Leaver lookup failed");
                UserProfile::new(cmd.user_id.clone(), "", "")
            }
        };
        let organizer_notified = self
            .notifier
            .emit(Notification::attendee_left(&event, &profile))
            .await;

        // 4. Remove the record
        if !self.attendance.remove(&event.id, &cmd.user_id).await? {
            return Err(AttendanceError::not_attending(event.id, cmd.user_id));
        }
        tracing::info!(event_id = %event.id, user_id = %cmd.user_id, "User left event");

        // 5. Apply the leave policy to any live ticket
        let revoked_ticket = self.apply_leave_policy(&event, &cmd.user_id).await;

        Ok(LeaveEventResult {
            organizer_notified,
            revoked_ticket,
        })
    }

    async fn apply_leave_policy(&self, event: &Event, user_id: &UserId) -> Option<Ticket> {
        if self.policy == LeavePolicy::KeepTicket {
            return None;
        }

        let ticket = match self.tickets.find_live(&event.id, user_id).await {
            Ok(Some(ticket)) if self.policy.revokes(ticket.status) => ticket,
            Ok(_) => return None,
            Err(e) => {
                tracing::warn!(error = %e, event_id = %event.id, user_id = %user_id, "Live ticket lookup failed");
                return None;
            }
        };

        match apply_transition(self.tickets.as_ref(), ticket, |t| {
            t.revoke(LEFT_EVENT_REVOKE_REASON)
        })
        .await
        {
            Ok((ticket, _)) => {
                tracing::info!(
                    event_id = %event.id,
                    ticket_number = %ticket.ticket_number,
                    "Ticket revoked after holder left"
                );
                Some(ticket)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    event_id = %event.id,
                    user_id = %user_id,
                    "Could not revoke ticket of departed attendee"
                );
                None
            }
        }
    }
}
