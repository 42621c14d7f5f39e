//! Route configuration for ticket endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    check_in, list_event_tickets, list_my_tickets, purchase_ticket, review_ticket, revoke_ticket,
    verify_by_number, verify_by_token,
};

/// Routes:
/// - `POST /api/events/:event_id/tickets` - Purchase
/// - `GET /api/events/:event_id/tickets` - Organizer listing with summary
/// - `GET /api/me/tickets` - Caller's tickets
/// - `GET /api/tickets/verify/:number` - Verify by number
/// - `GET /api/tickets/verify-token/:token` - Verify by QR token
/// - `POST /api/tickets/use/:number` - Check in
/// - `POST /api/tickets/:ticket_id/approve` - Approve or reject
/// - `POST /api/tickets/:ticket_id/revoke` - Revoke
pub fn ticket_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/events/:event_id/tickets",
            post(purchase_ticket).get(list_event_tickets),
        )
        .route("/api/me/tickets", get(list_my_tickets))
        .route("/api/tickets/verify/:number", get(verify_by_number))
        .route("/api/tickets/verify-token/:token", get(verify_by_token))
        .route("/api/tickets/use/:number", post(check_in))
        .route("/api/tickets/:ticket_id/approve", post(review_ticket))
        .route("/api/tickets/:ticket_id/revoke", post(revoke_ticket))
}
