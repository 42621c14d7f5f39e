//! ListNotificationsHandler - the caller's inbox.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

pub struct ListNotificationsHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl ListNotificationsHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Newest first.
    pub async fn handle(&self, recipient: &UserId) -> Result<Vec<Notification>, DomainError> {
        self.notifications.list_for_recipient(recipient).await
    }
}
