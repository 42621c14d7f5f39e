//! In-memory ticket renderer.
//!
//! Records every render call and can be switched into a failing or slow
//! mode to exercise the degraded paths.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::event::Event;
use crate::domain::foundation::TicketId;
use crate::domain::ticket::{ArtifactRef, Ticket, DEFAULT_ARTIFACT_BASE_PATH};
use crate::domain::user::UserProfile;
use crate::ports::{RenderError, TicketRenderer};

#[derive(Debug, Default)]
pub struct RecordingTicketRenderer {
    rendered: Mutex<Vec<TicketId>>,
    failing: AtomicBool,
    delay: Option<Duration>,
}

impl RecordingTicketRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleeps before answering each render.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Ids of tickets rendered so far, in call order.
    pub fn rendered(&self) -> Vec<TicketId> {
        self.rendered
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TicketRenderer for RecordingTicketRenderer {
    async fn render(
        &self,
        ticket: &Ticket,
        _event: &Event,
        _holder: &UserProfile,
    ) -> Result<ArtifactRef, RenderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(RenderError::Unavailable("renderer switched off".to_string()));
        }
        if let Ok(mut rendered) = self.rendered.lock() {
            rendered.push(ticket.id);
        }
        Ok(ArtifactRef::for_ticket_number(
            DEFAULT_ARTIFACT_BASE_PATH,
            &ticket.ticket_number,
        ))
    }
}
