//! HTTP handlers for ticket endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::handlers::ticket::{
    CheckInTicketCommand, ListEventTicketsQuery, PurchaseTicketCommand, ReviewTicketCommand,
    RevokeTicketCommand, TicketReference, VerifyTicketQuery,
};
use crate::domain::foundation::{EventId, TicketId};

use super::super::auth::AuthenticatedUser;
use super::super::error::TicketApiError;
use super::super::state::AppState;
use super::dto::{
    CheckInResponse, EventTicketsResponse, ReviewTicketRequest, ReviewTicketResponse,
    RevokeTicketRequest, TicketListResponse, TicketResponse, VerifyTicketResponse,
};

/// POST /api/events/:event_id/tickets - Buy a ticket
pub async fn purchase_ticket(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, TicketApiError> {
    let result = state
        .purchase_ticket_handler()
        .handle(PurchaseTicketCommand {
            event_id: EventId::from_uuid(event_id),
            user_id: user.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TicketResponse::from(&result.ticket))))
}

/// GET /api/events/:event_id/tickets - Organizer view of an event's tickets
pub async fn list_event_tickets(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, TicketApiError> {
    let result = state
        .list_event_tickets_handler()
        .handle(ListEventTicketsQuery {
            event_id: EventId::from_uuid(event_id),
            requested_by: user.user_id,
        })
        .await?;

    Ok(Json(EventTicketsResponse::from(result)))
}

/// GET /api/me/tickets - Caller's tickets, newest first
pub async fn list_my_tickets(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, TicketApiError> {
    let tickets = state
        .list_user_tickets_handler()
        .handle(&user.user_id)
        .await?;

    Ok(Json(TicketListResponse::from(tickets)))
}

/// GET /api/tickets/verify/:number - Check a ticket by its number
pub async fn verify_by_number(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<impl IntoResponse, TicketApiError> {
    let result = state
        .verify_ticket_handler()
        .handle(VerifyTicketQuery {
            reference: TicketReference::Number(number),
        })
        .await?;

    Ok(Json(VerifyTicketResponse::from(result)))
}

/// GET /api/tickets/verify-token/:token - Check a ticket by its QR token
pub async fn verify_by_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, TicketApiError> {
    let result = state
        .verify_ticket_handler()
        .handle(VerifyTicketQuery {
            reference: TicketReference::Token(token),
        })
        .await?;

    Ok(Json(VerifyTicketResponse::from(result)))
}

/// POST /api/tickets/use/:number - Check in at the door
pub async fn check_in(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<impl IntoResponse, TicketApiError> {
    let result = state
        .check_in_ticket_handler()
        .handle(CheckInTicketCommand {
            ticket_number: number,
        })
        .await?;

    Ok(Json(CheckInResponse::from(result)))
}

/// POST /api/tickets/:ticket_id/approve - Approve or reject a pending ticket
pub async fn review_ticket(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(ticket_id): Path<Uuid>,
    Json(request): Json<ReviewTicketRequest>,
) -> Result<impl IntoResponse, TicketApiError> {
    let result = state
        .review_ticket_handler()
        .handle(ReviewTicketCommand {
            ticket_id: TicketId::from_uuid(ticket_id),
            reviewer: user.user_id,
            action: request.action,
        })
        .await?;

    Ok(Json(ReviewTicketResponse::from(result)))
}

/// POST /api/tickets/:ticket_id/revoke - Revoke a ticket
pub async fn revoke_ticket(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(ticket_id): Path<Uuid>,
    request: Option<Json<RevokeTicketRequest>>,
) -> Result<impl IntoResponse, TicketApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let result = state
        .revoke_ticket_handler()
        .handle(RevokeTicketCommand {
            ticket_id: TicketId::from_uuid(ticket_id),
            revoked_by: user.user_id,
            reason: request.reason,
        })
        .await?;

    Ok(Json(TicketResponse::from(&result.ticket)))
}
