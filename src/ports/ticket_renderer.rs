//! Ticket renderer port.
//!
//! Produces the printable document (PDF with QR code) for a confirmed
//! ticket. Rendering is a best-effort side effect: callers bound it with a
//! timeout and keep the ticket confirmed when it fails, leaving the
//! artifact empty so rendering can be retried later.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::event::Event;
use crate::domain::ticket::{ArtifactRef, Ticket};
use crate::domain::user::UserProfile;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("ticket renderer unavailable: {0}")]
    Unavailable(String),

    #[error("ticket renderer timed out after {0}ms")]
    Timeout(u64),
}

#[async_trait]
pub trait TicketRenderer: Send + Sync {
    /// Render the ticket and return where the document lives.
    async fn render(
        &self,
        ticket: &Ticket,
        event: &Event,
        holder: &UserProfile,
    ) -> Result<ArtifactRef, RenderError>;
}
