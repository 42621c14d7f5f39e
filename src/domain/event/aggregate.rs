//! Event aggregate as seen by the attendance engine.
//!
//! Events are created and edited by organizers elsewhere; this core only
//! reads them to decide admission and ticket policy.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, Timestamp, UserId, ValidationError};

use super::Capacity;

/// Ticketing configuration of an event.
///
/// Approval and price only exist when ticketing is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TicketingPolicy {
    Disabled,
    Enabled {
        requires_approval: bool,
        /// Price in minor units (cents).
        price_cents: Option<i64>,
    },
}

impl TicketingPolicy {
    /// Builds a policy from the flat column layout used by the store.
    ///
    /// Approval and price columns are ignored when ticketing is disabled.
    pub fn from_columns(
        enabled: bool,
        requires_approval: bool,
        price_cents: Option<i64>,
    ) -> Result<Self, ValidationError> {
        if !enabled {
            return Ok(TicketingPolicy::Disabled);
        }
        if let Some(price) = price_cents {
            if price < 0 {
                return Err(ValidationError::out_of_range("ticket_price", 0, i64::MAX, price));
            }
        }
        Ok(TicketingPolicy::Enabled {
            requires_approval,
            price_cents,
        })
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, TicketingPolicy::Enabled { .. })
    }

    pub fn requires_approval(&self) -> bool {
        matches!(
            self,
            TicketingPolicy::Enabled {
                requires_approval: true,
                ..
            }
        )
    }

    pub fn price_cents(&self) -> Option<i64> {
        match self {
            TicketingPolicy::Enabled { price_cents, .. } => *price_cents,
            TicketingPolicy::Disabled => None,
        }
    }
}

/// What counts as an occupied seat for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyBasis {
    /// One seat per attendance record.
    Attendance,
    /// One seat per distinct user holding a confirmed/used ticket, plus
    /// attendees who have no ticket for the event yet.
    SeatHolders,
}

/// A scheduled event with a bounded number of seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub organizer_id: UserId,
    pub name: String,
    pub location: String,
    pub starts_at: Timestamp,
    pub capacity: Capacity,
    pub ticketing: TicketingPolicy,
}

impl Event {
    pub fn new(
        id: EventId,
        organizer_id: UserId,
        name: impl Into<String>,
        location: impl Into<String>,
        starts_at: Timestamp,
        capacity: Capacity,
        ticketing: TicketingPolicy,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id,
            organizer_id,
            name,
            location: location.into(),
            starts_at,
            capacity,
            ticketing,
        })
    }

    pub fn is_organized_by(&self, user_id: &UserId) -> bool {
        &self.organizer_id == user_id
    }

    pub fn occupancy_basis(&self) -> OccupancyBasis {
        if self.ticketing.is_enabled() {
            OccupancyBasis::SeatHolders
        } else {
            OccupancyBasis::Attendance
        }
    }
}
