//! HTTP adapter - REST API over the attendance and ticket handlers.
//!
//! Each area has its own sub-module with DTOs, handlers and a router:
//! - `attendance` - join, leave, attendee lists
//! - `tickets` - purchase, review, revoke, verify, check-in
//! - `notifications` - organizer inbox

pub mod attendance;
pub mod auth;
pub mod error;
pub mod notifications;
pub mod state;
pub mod tickets;

use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use attendance::attendance_router;
pub use auth::{AuthenticatedUser, USER_ID_HEADER};
pub use notifications::notification_router;
pub use state::AppState;
pub use tickets::ticket_router;

/// Full API router with tracing and a per-request timeout.
pub fn api_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(attendance_router())
        .merge(ticket_router())
        .merge(notification_router())
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}
