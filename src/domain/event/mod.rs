//! Event domain module.
//!
//! - `aggregate` - Event and its ticketing policy
//! - `capacity` - Capacity value object and admission ledger

mod aggregate;
mod capacity;

pub use aggregate::{Event, OccupancyBasis, TicketingPolicy};
pub use capacity::{Admission, Capacity, CapacityLedger, MAX_CAPACITY};
