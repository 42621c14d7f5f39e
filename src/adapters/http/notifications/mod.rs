//! HTTP adapter for the notification inbox.
//!
//! - `GET /api/notifications` - caller's notifications, newest first
//! - `DELETE /api/notifications/:notification_id` - dismiss one of them

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::Router;
use serde::Serialize;
use uuid::Uuid;

use super::auth::AuthenticatedUser;
use super::error::DomainApiError;
use super::state::AppState;
use crate::application::handlers::notification::DeleteNotificationCommand;
use crate::domain::foundation::NotificationId;
use crate::domain::notification::Notification;

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub event_id: String,
    pub message: String,
    pub created_at: String,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id.to_string(),
            event_id: n.event_id.to_string(),
            message: n.message,
            created_at: n.created_at.to_rfc3339(),
        }
    }
}

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, DomainApiError> {
    let notifications = state
        .list_notifications_handler()
        .handle(&user.user_id)
        .await?;

    Ok(Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteNotificationResponse {
    pub message: &'static str,
}

/// DELETE /api/notifications/:notification_id
pub async fn delete_notification(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, DomainApiError> {
    state
        .delete_notification_handler()
        .handle(DeleteNotificationCommand {
            notification_id: NotificationId::from_uuid(notification_id),
            recipient: user.user_id,
        })
        .await?;

    Ok(Json(DeleteNotificationResponse {
        message: "Notification deleted",
    }))
}

pub fn notification_router() -> Router<AppState> {
    Router::new()
        .route("/api/notifications", get(list_notifications))
        .route("/api/notifications/:notification_id", delete(delete_notification))
}
