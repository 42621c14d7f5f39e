//! PostgreSQL implementation of TicketRepository.
//!
//! Issuance and confirmation lock the event row and count seats in the
//! same transaction as the write. Every other status change is a
//! compare-and-set on the status column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::occupancy::{count_occupancy, lock_event};
use super::{database_error, violated_constraint};
use crate::domain::event::{Admission, CapacityLedger, Event};
use crate::domain::foundation::{DomainError, ErrorCode, EventId, TicketId, Timestamp, UserId};
use crate::domain::ticket::{ArtifactRef, Ticket, TicketNumber, TicketStatus, VerificationToken};
use crate::ports::{IssueOutcome, TicketRepository, TransitionOutcome};

const TICKET_COLUMNS: &str = "id, ticket_number, verification_token, event_id, user_id, status, \
     purchased_at, used_at, revoked_at, revoked_reason, artifact_path, updated_at";

const NUMBER_KEY: &str = "tickets_ticket_number_key";
const TOKEN_KEY: &str = "tickets_verification_token_key";
const ONE_LIVE_PER_HOLDER: &str = "tickets_one_live_per_holder";

pub struct PostgresTicketRepository {
    pool: PgPool,
}

impl PostgresTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<Ticket>, DomainError> {
        let row: Option<TicketRow> = sqlx::query_as(&format!(
            "SELECT {} FROM tickets WHERE {} = $1",
            TICKET_COLUMNS, column
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to load ticket", e))?;

        row.map(Ticket::try_from).transpose()
    }
}

/// Database row representation of a ticket.
#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: Uuid,
    ticket_number: String,
    verification_token: String,
    event_id: Uuid,
    user_id: String,
    status: String,
    purchased_at: DateTime<Utc>,
    used_at: Option<DateTime<Utc>>,
    revoked_at: Option<DateTime<Utc>>,
    revoked_reason: Option<String>,
    artifact_path: Option<String>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = DomainError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        Ok(Ticket {
            id: TicketId::from_uuid(row.id),
            ticket_number: TicketNumber::new(row.ticket_number)?,
            verification_token: VerificationToken::new(row.verification_token)?,
            event_id: EventId::from_uuid(row.event_id),
            user_id: UserId::new(row.user_id)?,
            status: row.status.parse::<TicketStatus>()?,
            purchased_at: Timestamp::from_datetime(row.purchased_at),
            used_at: row.used_at.map(Timestamp::from_datetime),
            revoked_at: row.revoked_at.map(Timestamp::from_datetime),
            revoked_reason: row.revoked_reason,
            artifact: row.artifact_path.map(ArtifactRef::from_stored),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

async fn stored_status(
    tx: &mut Transaction<'_, Postgres>,
    id: &TicketId,
) -> Result<Option<TicketStatus>, DomainError> {
    let status: Option<String> =
        sqlx::query_scalar("SELECT status FROM tickets WHERE id = $1 FOR UPDATE")
            .bind(id.as_uuid())
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| database_error("Failed to lock ticket", e))?;

    status.map(|s| s.parse().map_err(DomainError::from)).transpose()
}

/// Writes the status columns of `ticket` if the stored status is `expected`.
async fn write_status<'c, E>(
    executor: E,
    ticket: &Ticket,
    expected: TicketStatus,
) -> Result<bool, DomainError>
where
    E: sqlx::Executor<'c, Database = Postgres>,
{
    let result = sqlx::query(
        r#"
        UPDATE tickets SET
            status = $3,
            used_at = $4,
            revoked_at = $5,
            revoked_reason = $6,
            updated_at = $7
        WHERE id = $1 AND status = $2
        "#,
    )
    .bind(ticket.id.as_uuid())
    .bind(expected.as_str())
    .bind(ticket.status.as_str())
    .bind(ticket.used_at.map(|t| *t.as_datetime()))
    .bind(ticket.revoked_at.map(|t| *t.as_datetime()))
    .bind(&ticket.revoked_reason)
    .bind(ticket.updated_at.as_datetime())
    .execute(executor)
    .await
    .map_err(|e| database_error("Failed to update ticket status", e))?;

    Ok(result.rows_affected() == 1)
}

#[async_trait]
impl TicketRepository for PostgresTicketRepository {
    async fn issue(&self, event: &Event, ticket: &Ticket) -> Result<IssueOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("Failed to begin transaction", e))?;

        let Some(current) = lock_event(&mut tx, event).await? else {
            return Ok(IssueOutcome::EventNotFound);
        };

        let live: Option<TicketRow> = sqlx::query_as(&format!(
            "SELECT {} FROM tickets WHERE event_id = $1 AND user_id = $2 \
             AND status IN ('pending', 'confirmed', 'used')",
            TICKET_COLUMNS
        ))
        .bind(ticket.event_id.as_uuid())
        .bind(ticket.user_id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| database_error("Failed to check live ticket", e))?;
        if let Some(row) = live {
            return Ok(IssueOutcome::ExistingLive(Ticket::try_from(row)?));
        }

        if ticket.consumes_capacity() {
            let occupancy = count_occupancy(&mut tx, &current, &ticket.user_id).await?;
            if let Admission::Rejected { occupancy, .. } =
                CapacityLedger::admit(current.capacity, occupancy)
            {
                return Ok(IssueOutcome::Full { occupancy });
            }
        }

        let inserted = sqlx::query(&format!(
            "INSERT INTO tickets ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
            TICKET_COLUMNS
        ))
        .bind(ticket.id.as_uuid())
        .bind(ticket.ticket_number.as_str())
        .bind(ticket.verification_token.as_str())
        .bind(ticket.event_id.as_uuid())
        .bind(ticket.user_id.as_str())
        .bind(ticket.status.as_str())
        .bind(ticket.purchased_at.as_datetime())
        .bind(ticket.used_at.map(|t| *t.as_datetime()))
        .bind(ticket.revoked_at.map(|t| *t.as_datetime()))
        .bind(&ticket.revoked_reason)
        .bind(ticket.artifact.as_ref().map(|a| a.as_str().to_string()))
        .bind(ticket.updated_at.as_datetime())
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(e) => {
                let constraint = violated_constraint(&e).map(str::to_owned);
                return match constraint.as_deref() {
                    Some(NUMBER_KEY) | Some(TOKEN_KEY) => Ok(IssueOutcome::DuplicateCredentials),
                    Some(ONE_LIVE_PER_HOLDER) => {
                        drop(tx);
                        match self.find_live(&ticket.event_id, &ticket.user_id).await? {
                            Some(existing) => Ok(IssueOutcome::ExistingLive(existing)),
                            None => Err(DomainError::new(
                                ErrorCode::ConcurrentModification,
                                "Live ticket changed during issuance",
                            )),
                        }
                    }
                    _ => Err(database_error("Failed to insert ticket", e)),
                };
            }
        }

        tx.commit()
            .await
            .map_err(|e| database_error("Failed to commit transaction", e))?;

        Ok(IssueOutcome::Issued(ticket.clone()))
    }

    async fn confirm(
        &self,
        event: &Event,
        ticket: &Ticket,
        expected: TicketStatus,
    ) -> Result<TransitionOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("Failed to begin transaction", e))?;

        let current = lock_event(&mut tx, event).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::EventNotFound, format!("Event not found: {}", event.id))
        })?;

        if stored_status(&mut tx, &ticket.id).await? != Some(expected) {
            return Ok(TransitionOutcome::Conflict);
        }

        let occupancy = count_occupancy(&mut tx, &current, &ticket.user_id).await?;
        if let Admission::Rejected { occupancy, .. } =
            CapacityLedger::admit(current.capacity, occupancy)
        {
            return Ok(TransitionOutcome::Full { occupancy });
        }

        if !write_status(&mut *tx, ticket, expected).await? {
            return Ok(TransitionOutcome::Conflict);
        }

        tx.commit()
            .await
            .map_err(|e| database_error("Failed to commit transaction", e))?;

        Ok(TransitionOutcome::Applied)
    }

    async fn transition(
        &self,
        ticket: &Ticket,
        expected: TicketStatus,
    ) -> Result<TransitionOutcome, DomainError> {
        if write_status(&self.pool, ticket, expected).await? {
            Ok(TransitionOutcome::Applied)
        } else {
            Ok(TransitionOutcome::Conflict)
        }
    }

    async fn attach_artifact(
        &self,
        id: &TicketId,
        artifact: &ArtifactRef,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE tickets SET artifact_path = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(artifact.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to store ticket artifact", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TicketNotFound,
                format!("Ticket not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, DomainError> {
        let row: Option<TicketRow> =
            sqlx::query_as(&format!("SELECT {} FROM tickets WHERE id = $1", TICKET_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| database_error("Failed to load ticket", e))?;

        row.map(Ticket::try_from).transpose()
    }

    async fn find_by_number(&self, number: &TicketNumber) -> Result<Option<Ticket>, DomainError> {
        self.fetch_one_where("ticket_number", number.as_str()).await
    }

    async fn find_by_token(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<Ticket>, DomainError> {
        self.fetch_one_where("verification_token", token.as_str()).await
    }

    async fn find_live(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<Option<Ticket>, DomainError> {
        let row: Option<TicketRow> = sqlx::query_as(&format!(
            "SELECT {} FROM tickets WHERE event_id = $1 AND user_id = $2 \
             AND status IN ('pending', 'confirmed', 'used')",
            TICKET_COLUMNS
        ))
        .bind(event_id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to load live ticket", e))?;

        row.map(Ticket::try_from).transpose()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Ticket>, DomainError> {
        let rows: Vec<TicketRow> = sqlx::query_as(&format!(
            "SELECT {} FROM tickets WHERE user_id = $1 ORDER BY purchased_at DESC",
            TICKET_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list tickets", e))?;

        rows.into_iter().map(Ticket::try_from).collect()
    }

    async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<Ticket>, DomainError> {
        let rows: Vec<TicketRow> = sqlx::query_as(&format!(
            "SELECT {} FROM tickets WHERE event_id = $1 ORDER BY purchased_at DESC",
            TICKET_COLUMNS
        ))
        .bind(event_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list tickets", e))?;

        rows.into_iter().map(Ticket::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> TicketRow {
        let now = Utc::now();
        TicketRow {
            id: Uuid::new_v4(),
            ticket_number: "TKT-1700000000000-ABCDEFGHI".to_string(),
            verification_token: "ab12".to_string(),
            event_id: Uuid::new_v4(),
            user_id: "alice".to_string(),
            status: status.to_string(),
            purchased_at: now,
            used_at: None,
            revoked_at: None,
            revoked_reason: None,
            artifact_path: Some("/tickets/ticket-TKT-1700000000000-ABCDEFGHI.pdf".to_string()),
            updated_at: now,
        }
    }

    #[test]
    fn converts_row_to_ticket() {
        let ticket = Ticket::try_from(row("confirmed")).unwrap();
        assert_eq!(ticket.status, TicketStatus::Confirmed);
        assert_eq!(
            ticket.artifact.unwrap().as_str(),
            "/tickets/ticket-TKT-1700000000000-ABCDEFGHI.pdf"
        );
    }

    #[test]
    fn rejects_unknown_status() {
        let err = Ticket::try_from(row("refunded")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn rejects_blank_holder() {
        let mut row = row("pending");
        row.user_id = " ".to_string();
        assert_eq!(Ticket::try_from(row).unwrap_err().code, ErrorCode::EmptyField);
    }
}
