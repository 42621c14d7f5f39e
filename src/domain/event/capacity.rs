//! Capacity value object and the admission ledger.
//!
//! The ledger is a pure decision: storage adapters count occupancy inside
//! their event-scoped serialized scope and ask the ledger whether one more
//! seat may be taken. Rejection is terminal for the request.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Upper bound accepted for event capacity.
pub const MAX_CAPACITY: i64 = i32::MAX as i64;

/// Maximum number of seats an event offers. Zero is legal and admits nobody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Capacity(u32);

impl Capacity {
    /// Creates a capacity, rejecting negative or oversized values.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if !(0..=MAX_CAPACITY).contains(&value) {
            return Err(ValidationError::out_of_range("capacity", 0, MAX_CAPACITY, value));
        }
        Ok(Self(value as u32))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Capacity {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Capacity::new(value)
    }
}

impl From<Capacity> for i64 {
    fn from(capacity: Capacity) -> Self {
        capacity.0 as i64
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of an admission decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Rejected { occupancy: u64, capacity: Capacity },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted)
    }
}

/// Stateless admission rule shared by every storage adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityLedger;

impl CapacityLedger {
    /// Admits iff `occupancy < capacity`.
    pub fn admit(capacity: Capacity, occupancy: u64) -> Admission {
        if occupancy < capacity.value() as u64 {
            Admission::Admitted
        } else {
            Admission::Rejected {
                occupancy,
                capacity,
            }
        }
    }
}
