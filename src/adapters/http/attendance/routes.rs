//! Route configuration for attendance endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{get_attendees, join_event, leave_event, list_my_events};

/// Routes:
/// - `POST /api/events/:event_id/join`
/// - `POST /api/events/:event_id/leave`
/// - `GET /api/events/:event_id/attendees`
/// - `GET /api/me/events`
pub fn attendance_router() -> Router<AppState> {
    Router::new()
        .route("/api/events/:event_id/join", post(join_event))
        .route("/api/events/:event_id/leave", post(leave_event))
        .route("/api/events/:event_id/attendees", get(get_attendees))
        .route("/api/me/events", get(list_my_events))
}
