//! Ticket command and query handlers.

mod auto_issue_ticket;
mod check_in_ticket;
mod issuer;
mod list_tickets;
mod purchase_ticket;
mod review_ticket;
mod revoke_ticket;
pub(crate) mod transition;
mod verify_ticket;

pub use auto_issue_ticket::{AutoIssueTicketHandler, AutoIssueTicketResult};
pub use check_in_ticket::{CheckInTicketCommand, CheckInTicketHandler, CheckInTicketResult};
pub use issuer::{Issuance, TicketIssuer};
pub use list_tickets::{
    EventTickets, ListEventTicketsHandler, ListEventTicketsQuery, ListUserTicketsHandler,
    TicketSummary,
};
pub use purchase_ticket::{PurchaseTicketCommand, PurchaseTicketHandler, PurchaseTicketResult};
pub use review_ticket::{ReviewAction, ReviewTicketCommand, ReviewTicketHandler, ReviewTicketResult};
pub use revoke_ticket::{
    RevokeTicketCommand, RevokeTicketHandler, RevokeTicketResult, DEFAULT_REVOKE_REASON,
};
pub use verify_ticket::{TicketReference, VerifyTicketHandler, VerifyTicketQuery, VerifyTicketResult};
