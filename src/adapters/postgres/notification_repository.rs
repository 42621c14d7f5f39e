//! PostgreSQL implementation of NotificationRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::database_error;
use crate::domain::foundation::{DomainError, EventId, NotificationId, Timestamp, UserId};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    recipient_id: String,
    event_id: Uuid,
    message: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = DomainError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: NotificationId::from_uuid(row.id),
            recipient_id: UserId::new(row.recipient_id)?,
            event_id: EventId::from_uuid(row.event_id),
            message: row.message,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn record(&self, notification: &Notification) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, recipient_id, event_id, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(notification.id.as_uuid())
        .bind(notification.recipient_id.as_str())
        .bind(notification.event_id.as_uuid())
        .bind(&notification.message)
        .bind(notification.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("Failed to record notification", e))?;

        Ok(())
    }

    async fn list_for_recipient(
        &self,
        recipient: &UserId,
    ) -> Result<Vec<Notification>, DomainError> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            r#"
            SELECT id, recipient_id, event_id, message, created_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(recipient.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list notifications", e))?;

        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn remove_for_recipient(
        &self,
        id: &NotificationId,
        recipient: &UserId,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND recipient_id = $2")
            .bind(id.as_uuid())
            .bind(recipient.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to delete notification", e))?;

        Ok(result.rows_affected() > 0)
    }
}
