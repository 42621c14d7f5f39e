//! Shared application state for the HTTP adapter.

use std::sync::Arc;

use crate::application::handlers::attendance::{
    GetAttendeesHandler, JoinEventHandler, LeaveEventHandler, ListJoinedEventsHandler,
};
use crate::application::handlers::notification::{
    DeleteNotificationHandler, ListNotificationsHandler,
};
use crate::application::handlers::ticket::{
    AutoIssueTicketHandler, CheckInTicketHandler, ListEventTicketsHandler, ListUserTicketsHandler,
    PurchaseTicketHandler, ReviewTicketHandler, RevokeTicketHandler, TicketIssuer,
    VerifyTicketHandler,
};
use crate::application::NotificationEmitter;
use crate::domain::attendance::LeavePolicy;
use crate::domain::ticket::TicketCredentialGenerator;
use crate::ports::{
    AttendanceRepository, EventReader, NotificationRepository, TicketRepository, UserDirectory,
};

/// Dependencies shared by every request.
///
/// Cloned per request; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub events: Arc<dyn EventReader>,
    pub users: Arc<dyn UserDirectory>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub tickets: Arc<dyn TicketRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub credentials: Arc<dyn TicketCredentialGenerator>,
    pub issuer: Arc<TicketIssuer>,
    pub notifier: Arc<NotificationEmitter>,
    pub leave_policy: LeavePolicy,
}

impl AppState {
    // Attendance

    pub fn join_event_handler(&self) -> JoinEventHandler {
        JoinEventHandler::new(
            self.events.clone(),
            self.users.clone(),
            self.attendance.clone(),
            self.notifier.clone(),
            Arc::new(AutoIssueTicketHandler::new(self.issuer.clone())),
        )
    }

    pub fn leave_event_handler(&self) -> LeaveEventHandler {
        LeaveEventHandler::new(
            self.events.clone(),
            self.users.clone(),
            self.attendance.clone(),
            self.tickets.clone(),
            self.notifier.clone(),
            self.leave_policy,
        )
    }

    pub fn get_attendees_handler(&self) -> GetAttendeesHandler {
        GetAttendeesHandler::new(self.events.clone(), self.attendance.clone())
    }

    pub fn list_joined_events_handler(&self) -> ListJoinedEventsHandler {
        ListJoinedEventsHandler::new(self.attendance.clone())
    }

    // Tickets

    pub fn purchase_ticket_handler(&self) -> PurchaseTicketHandler {
        PurchaseTicketHandler::new(self.events.clone(), self.issuer.clone())
    }

    pub fn review_ticket_handler(&self) -> ReviewTicketHandler {
        ReviewTicketHandler::new(self.events.clone(), self.tickets.clone(), self.issuer.clone())
    }

    pub fn revoke_ticket_handler(&self) -> RevokeTicketHandler {
        RevokeTicketHandler::new(self.events.clone(), self.tickets.clone())
    }

    pub fn check_in_ticket_handler(&self) -> CheckInTicketHandler {
        CheckInTicketHandler::new(self.tickets.clone())
    }

    pub fn verify_ticket_handler(&self) -> VerifyTicketHandler {
        VerifyTicketHandler::new(self.tickets.clone(), self.credentials.clone())
    }

    pub fn list_user_tickets_handler(&self) -> ListUserTicketsHandler {
        ListUserTicketsHandler::new(self.tickets.clone())
    }

    pub fn list_event_tickets_handler(&self) -> ListEventTicketsHandler {
        ListEventTicketsHandler::new(self.events.clone(), self.tickets.clone())
    }

    // Notifications

    pub fn list_notifications_handler(&self) -> ListNotificationsHandler {
        ListNotificationsHandler::new(self.notifications.clone())
    }

    pub fn delete_notification_handler(&self) -> DeleteNotificationHandler {
        DeleteNotificationHandler::new(self.notifications.clone())
    }
}
