//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Store Ports
//!
//! - `EventReader` - Read-only access to organizer-authored events
//! - `UserDirectory` - Profiles from the identity provider
//! - `AttendanceRepository` - Capacity-guarded attendance records
//! - `TicketRepository` - Capacity-guarded issuance and compare-and-set transitions
//! - `NotificationRepository` - Organizer inbox
//!
//! ## Side-Effect Ports
//!
//! - `TicketRenderer` - Printable ticket documents

mod attendance_repository;
mod event_reader;
mod notification_repository;
mod ticket_renderer;
mod ticket_repository;
mod user_directory;

pub use attendance_repository::{AttendanceRepository, AttendeeView, JoinOutcome, JoinedEventView};
pub use event_reader::EventReader;
pub use notification_repository::NotificationRepository;
pub use ticket_renderer::{RenderError, TicketRenderer};
pub use ticket_repository::{IssueOutcome, TicketRepository, TransitionOutcome};
pub use user_directory::UserDirectory;
