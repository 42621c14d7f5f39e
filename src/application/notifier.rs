//! Fire-and-forget notification side channel.
//!
//! Recording a notification is bounded by a timeout and never fails the
//! caller: the attendance change that triggered it has already committed.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

pub struct NotificationEmitter {
    repository: Arc<dyn NotificationRepository>,
    timeout: Duration,
}

impl NotificationEmitter {
    pub fn new(repository: Arc<dyn NotificationRepository>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }

    /// Records the notification. Returns whether it was stored.
    pub async fn emit(&self, notification: Notification) -> bool {
        match tokio::time::timeout(self.timeout, self.repository.record(&notification)).await {
            Ok(Ok(())) => {
                tracing::debug!(
                    recipient = %notification.recipient_id,
                    event_id = %notification.event_id,
                    "Notification recorded"
                );
                true
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    error = %e,
                    recipient = %notification.recipient_id,
                    event_id = %notification.event_id,
                    "Failed to record notification"
                );
                false
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    recipient = %notification.recipient_id,
                    event_id = %notification.event_id,
                    "Timed out recording notification"
                );
                false
            }
        }
    }
}
