//! Notification repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn record(&self, notification: &Notification) -> Result<(), DomainError>;

    /// Notifications addressed to `recipient`, newest first.
    async fn list_for_recipient(
        &self,
        recipient: &UserId,
    ) -> Result<Vec<Notification>, DomainError>;

    /// Deletes the notification if it is addressed to `recipient`.
    /// Returns false when no such notification exists for them.
    async fn remove_for_recipient(
        &self,
        id: &NotificationId,
        recipient: &UserId,
    ) -> Result<bool, DomainError>;
}
