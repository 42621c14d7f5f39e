//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-process store for tests and local runs
//! - `postgres` - PostgreSQL-backed repositories
//! - `renderer` - Printable ticket rendering over HTTP
//! - `http` - REST API (axum)

pub mod http;
pub mod memory;
pub mod postgres;
pub mod renderer;

pub use memory::{InMemoryStore, RecordingTicketRenderer};
pub use postgres::{
    PostgresAttendanceRepository, PostgresEventReader, PostgresNotificationRepository,
    PostgresTicketRepository, PostgresUserDirectory, MIGRATOR,
};
pub use renderer::HttpTicketRenderer;
