//! PostgreSQL implementation of AttendanceRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::occupancy::{count_occupancy, lock_event};
use super::{database_error, violated_constraint};
use crate::domain::attendance::Attendance;
use crate::domain::event::{Admission, CapacityLedger, Event};
use crate::domain::foundation::{DomainError, EventId, Timestamp, UserId};
use crate::ports::{AttendanceRepository, AttendeeView, JoinOutcome, JoinedEventView};

const ATTENDEES_PKEY: &str = "event_attendees_pkey";

pub struct PostgresAttendanceRepository {
    pool: PgPool,
}

impl PostgresAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AttendanceRow {
    event_id: Uuid,
    user_id: String,
    joined_at: DateTime<Utc>,
    rsvp: bool,
}

impl TryFrom<AttendanceRow> for Attendance {
    type Error = DomainError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        Ok(Attendance {
            event_id: EventId::from_uuid(row.event_id),
            user_id: UserId::new(row.user_id)?,
            joined_at: Timestamp::from_datetime(row.joined_at),
            rsvp: row.rsvp,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AttendeeRow {
    user_id: String,
    full_name: Option<String>,
    email: Option<String>,
    joined_at: DateTime<Utc>,
    rsvp: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct JoinedEventRow {
    event_id: Uuid,
    name: String,
    location: String,
    starts_at: DateTime<Utc>,
    joined_at: DateTime<Utc>,
    rsvp: bool,
}

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepository {
    async fn admit(
        &self,
        event: &Event,
        attendance: &Attendance,
    ) -> Result<JoinOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("Failed to begin transaction", e))?;

        // Serializes every seat decision for this event
        let Some(current) = lock_event(&mut tx, event).await? else {
            return Ok(JoinOutcome::EventNotFound);
        };

        let existing: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM event_attendees WHERE event_id = $1 AND user_id = $2",
        )
        .bind(attendance.event_id.as_uuid())
        .bind(attendance.user_id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| database_error("Failed to check attendance", e))?;
        if existing.is_some() {
            return Ok(JoinOutcome::AlreadyJoined);
        }

        let occupancy = count_occupancy(&mut tx, &current, &attendance.user_id).await?;
        if let Admission::Rejected { occupancy, .. } =
            CapacityLedger::admit(current.capacity, occupancy)
        {
            return Ok(JoinOutcome::Full { occupancy });
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO event_attendees (event_id, user_id, joined_at, rsvp)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(attendance.event_id.as_uuid())
        .bind(attendance.user_id.as_str())
        .bind(attendance.joined_at.as_datetime())
        .bind(attendance.rsvp)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(e) if violated_constraint(&e) == Some(ATTENDEES_PKEY) => {
                return Ok(JoinOutcome::AlreadyJoined);
            }
            Err(e) => return Err(database_error("Failed to insert attendance", e)),
        }

        tx.commit()
            .await
            .map_err(|e| database_error("Failed to commit transaction", e))?;

        Ok(JoinOutcome::Joined(attendance.clone()))
    }

    async fn find(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<Option<Attendance>, DomainError> {
        let row: Option<AttendanceRow> = sqlx::query_as(
            r#"
            SELECT event_id, user_id, joined_at, rsvp
            FROM event_attendees
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to load attendance", e))?;

        row.map(Attendance::try_from).transpose()
    }

    async fn remove(&self, event_id: &EventId, user_id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM event_attendees WHERE event_id = $1 AND user_id = $2")
            .bind(event_id.as_uuid())
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to remove attendance", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_attendees(&self, event_id: &EventId) -> Result<Vec<AttendeeView>, DomainError> {
        let rows: Vec<AttendeeRow> = sqlx::query_as(
            r#"
            SELECT a.user_id, u.full_name, u.email, a.joined_at, a.rsvp
            FROM event_attendees a
            LEFT JOIN users u ON u.id = a.user_id
            WHERE a.event_id = $1
            ORDER BY a.joined_at ASC
            "#,
        )
        .bind(event_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list attendees", e))?;

        rows.into_iter()
            .map(|row| -> Result<AttendeeView, DomainError> {
                Ok(AttendeeView {
                    user_id: UserId::new(row.user_id)?,
                    full_name: row.full_name.unwrap_or_default(),
                    email: row.email.unwrap_or_default(),
                    joined_at: Timestamp::from_datetime(row.joined_at),
                    rsvp: row.rsvp,
                })
            })
            .collect()
    }

    async fn list_joined_events(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<JoinedEventView>, DomainError> {
        let rows: Vec<JoinedEventRow> = sqlx::query_as(
            r#"
            SELECT e.id AS event_id, e.name, e.location, e.starts_at, a.joined_at, a.rsvp
            FROM event_attendees a
            JOIN events e ON e.id = a.event_id
            WHERE a.user_id = $1
            ORDER BY a.joined_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list joined events", e))?;

        Ok(rows
            .into_iter()
            .map(|row| JoinedEventView {
                event_id: EventId::from_uuid(row.event_id),
                event_name: row.name,
                location: row.location,
                starts_at: Timestamp::from_datetime(row.starts_at),
                joined_at: Timestamp::from_datetime(row.joined_at),
                rsvp: row.rsvp,
            })
            .collect())
    }
}
