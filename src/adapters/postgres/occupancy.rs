//! Event locking and seat counting shared by the capacity-guarded writes.

use sqlx::{Postgres, Transaction};

use super::database_error;
use super::event_reader::{EventRow, EVENT_COLUMNS};
use crate::domain::event::{Event, OccupancyBasis};
use crate::domain::foundation::{DomainError, UserId};

/// Re-reads the event and holds its row lock until the transaction ends.
pub(super) async fn lock_event(
    tx: &mut Transaction<'_, Postgres>,
    event: &Event,
) -> Result<Option<Event>, DomainError> {
    let row: Option<EventRow> = sqlx::query_as(&format!(
        "SELECT {} FROM events WHERE id = $1 FOR UPDATE",
        EVENT_COLUMNS
    ))
    .bind(event.id.as_uuid())
    .fetch_optional(&mut **tx)
    .await
    .map_err(|e| database_error("Failed to lock event", e))?;

    row.map(Event::try_from).transpose()
}

/// Occupied seats, not counting `excluding`.
pub(super) async fn count_occupancy(
    tx: &mut Transaction<'_, Postgres>,
    event: &Event,
    excluding: &UserId,
) -> Result<u64, DomainError> {
    let sql = match event.occupancy_basis() {
        OccupancyBasis::Attendance => {
            r#"
            SELECT COUNT(*) FROM event_attendees
            WHERE event_id = $1 AND user_id <> $2
            "#
        }
        OccupancyBasis::SeatHolders => {
            r#"
            SELECT COUNT(*) FROM (
                SELECT a.user_id FROM event_attendees a
                WHERE a.event_id = $1 AND a.user_id <> $2
                  AND NOT EXISTS (
                      SELECT 1 FROM tickets t
                      WHERE t.event_id = a.event_id AND t.user_id = a.user_id
                  )
                UNION
                SELECT user_id FROM tickets
                WHERE event_id = $1 AND user_id <> $2 AND status IN ('confirmed', 'used')
            ) AS seats
            "#
        }
    };

    let count: i64 = sqlx::query_scalar(sql)
        .bind(event.id.as_uuid())
        .bind(excluding.as_str())
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| database_error("Failed to count occupancy", e))?;

    Ok(count.max(0) as u64)
}
