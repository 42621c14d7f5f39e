//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod attendance;
pub mod notification;
pub mod ticket;

#[cfg(test)]
pub(crate) mod test_support;

pub use attendance::{
    EventAttendees, GetAttendeesHandler, GetAttendeesQuery, JoinEventCommand, JoinEventHandler,
    JoinEventResult, LeaveEventCommand, LeaveEventHandler, LeaveEventResult,
    ListJoinedEventsHandler, TicketOutcome,
};
pub use notification::{
    DeleteNotificationCommand, DeleteNotificationHandler, ListNotificationsHandler,
};
pub use ticket::{
    AutoIssueTicketHandler, AutoIssueTicketResult, CheckInTicketCommand, CheckInTicketHandler,
    CheckInTicketResult, EventTickets, Issuance, ListEventTicketsHandler, ListEventTicketsQuery,
    ListUserTicketsHandler, PurchaseTicketCommand, PurchaseTicketHandler, PurchaseTicketResult,
    ReviewAction, ReviewTicketCommand, ReviewTicketHandler, ReviewTicketResult,
    RevokeTicketCommand, RevokeTicketHandler, RevokeTicketResult, TicketIssuer, TicketReference,
    TicketSummary, VerifyTicketHandler, VerifyTicketQuery, VerifyTicketResult,
    DEFAULT_REVOKE_REASON,
};
