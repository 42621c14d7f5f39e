//! Event reader port.
//!
//! Events are authored outside this engine; it only needs to load them.

use async_trait::async_trait;

use crate::domain::event::Event;
use crate::domain::foundation::{DomainError, EventId};

#[async_trait]
pub trait EventReader: Send + Sync {
    /// Load an event by id. Returns `None` if it does not exist.
    async fn find_event(&self, id: &EventId) -> Result<Option<Event>, DomainError>;
}
