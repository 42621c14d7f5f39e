//! HTTP handlers for attendance endpoints.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::handlers::attendance::{
    GetAttendeesQuery, JoinEventCommand, LeaveEventCommand,
};
use crate::domain::foundation::EventId;

use super::super::auth::AuthenticatedUser;
use super::super::error::AttendanceApiError;
use super::super::state::AppState;
use super::dto::{AttendeesResponse, JoinEventResponse, JoinedEventResponse, LeaveEventResponse};

/// POST /api/events/:event_id/join
pub async fn join_event(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, AttendanceApiError> {
    let result = state
        .join_event_handler()
        .handle(JoinEventCommand {
            event_id: EventId::from_uuid(event_id),
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(JoinEventResponse::from(result)))
}

/// POST /api/events/:event_id/leave
pub async fn leave_event(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, AttendanceApiError> {
    let result = state
        .leave_event_handler()
        .handle(LeaveEventCommand {
            event_id: EventId::from_uuid(event_id),
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(LeaveEventResponse::from(result)))
}

/// GET /api/events/:event_id/attendees
pub async fn get_attendees(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, AttendanceApiError> {
    let result = state
        .get_attendees_handler()
        .handle(GetAttendeesQuery {
            event_id: EventId::from_uuid(event_id),
            viewer: user.user_id,
        })
        .await?;

    Ok(Json(AttendeesResponse::from(result)))
}

/// GET /api/me/events
pub async fn list_my_events(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AttendanceApiError> {
    let joined = state
        .list_joined_events_handler()
        .handle(&user.user_id)
        .await?;

    Ok(Json(
        joined
            .into_iter()
            .map(JoinedEventResponse::from)
            .collect::<Vec<_>>(),
    ))
}
