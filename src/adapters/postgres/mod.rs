//! PostgreSQL adapters - Database implementations of the storage ports.
//!
//! - `PostgresEventReader` / `PostgresUserDirectory` - read-only lookups
//! - `PostgresAttendanceRepository` - capacity-guarded joins
//! - `PostgresTicketRepository` - capacity-guarded issuance and
//!   compare-and-set status transitions
//! - `PostgresNotificationRepository` - organizer inbox
//!
//! Every capacity decision runs in a transaction that first takes a row
//! lock on the event (`SELECT ... FOR UPDATE`), so joins and confirmations
//! for the same event are serialized while other events proceed.

mod attendance_repository;
mod event_reader;
mod notification_repository;
mod occupancy;
mod ticket_repository;
mod user_directory;

pub use attendance_repository::PostgresAttendanceRepository;
pub use event_reader::PostgresEventReader;
pub use notification_repository::PostgresNotificationRepository;
pub use ticket_repository::PostgresTicketRepository;
pub use user_directory::PostgresUserDirectory;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Migrations embedded at compile time from `migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

fn database_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// Name of the violated constraint, if `e` is a constraint violation.
fn violated_constraint(e: &sqlx::Error) -> Option<&str> {
    match e {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}
