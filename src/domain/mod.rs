//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `event` - Events, ticketing policy and the capacity ledger
//! - `attendance` - Attendance records and leave policy
//! - `ticket` - Ticket lifecycle, credentials and verification
//! - `notification` - Organizer-facing notifications
//! - `user` - Read-only user profiles

pub mod attendance;
pub mod event;
pub mod foundation;
pub mod notification;
pub mod ticket;
pub mod user;
