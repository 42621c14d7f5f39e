//! GatherUp - Event attendance and ticket lifecycle engine
//!
//! Admits attendees to capacity-limited events, issues and verifies
//! tickets, and keeps organizers informed of who is coming.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
