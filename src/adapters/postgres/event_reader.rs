//! PostgreSQL implementation of EventReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::database_error;
use crate::domain::event::{Capacity, Event, TicketingPolicy};
use crate::domain::foundation::{DomainError, EventId, Timestamp, UserId};
use crate::ports::EventReader;

pub(super) const EVENT_COLUMNS: &str = "id, organizer_id, name, location, starts_at, capacity, \
     ticketing_enabled, requires_approval, ticket_price_cents";

pub struct PostgresEventReader {
    pool: PgPool,
}

impl PostgresEventReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an event.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct EventRow {
    pub id: Uuid,
    pub organizer_id: String,
    pub name: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub capacity: i32,
    pub ticketing_enabled: bool,
    pub requires_approval: bool,
    pub ticket_price_cents: Option<i64>,
}

impl TryFrom<EventRow> for Event {
    type Error = DomainError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let ticketing = TicketingPolicy::from_columns(
            row.ticketing_enabled,
            row.requires_approval,
            row.ticket_price_cents,
        )?;
        Ok(Event::new(
            EventId::from_uuid(row.id),
            UserId::new(row.organizer_id)?,
            row.name,
            row.location,
            Timestamp::from_datetime(row.starts_at),
            Capacity::new(i64::from(row.capacity))?,
            ticketing,
        )?)
    }
}

#[async_trait]
impl EventReader for PostgresEventReader {
    async fn find_event(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        let row: Option<EventRow> =
            sqlx::query_as(&format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| database_error("Failed to load event", e))?;

        row.map(Event::try_from).transpose()
    }
}
