//! DeleteNotificationHandler - the caller dismisses one of their notifications.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, NotificationId, UserId};
use crate::ports::NotificationRepository;

#[derive(Debug, Clone)]
pub struct DeleteNotificationCommand {
    pub notification_id: NotificationId,
    pub recipient: UserId,
}

pub struct DeleteNotificationHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl DeleteNotificationHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Someone else's notification is reported as not found.
    pub async fn handle(&self, cmd: DeleteNotificationCommand) -> Result<(), DomainError> {
        let removed = self
            .notifications
            .remove_for_recipient(&cmd.notification_id, &cmd.recipient)
            .await?;

        if !removed {
            return Err(DomainError::new(
                ErrorCode::NotificationNotFound,
                format!("Notification not found: {}", cmd.notification_id),
            ));
        }

        tracing::info!(
            notification_id = %cmd.notification_id,
            recipient = %cmd.recipient,
            "Notification deleted"
        );
        Ok(())
    }
}
