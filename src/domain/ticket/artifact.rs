//! Reference to a rendered ticket document.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TicketNumber;

/// Default directory prefix for rendered tickets.
pub const DEFAULT_ARTIFACT_BASE_PATH: &str = "/tickets";

/// Stable location of a ticket's rendered PDF.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactRef(String);

impl ArtifactRef {
    /// Derives the reference for a ticket number: `<base>/ticket-<number>.pdf`.
    pub fn for_ticket_number(base_path: &str, number: &TicketNumber) -> Self {
        let base = base_path.trim_end_matches('/');
        Self(format!("{}/ticket-{}.pdf", base, number))
    }

    /// Wraps a reference read back from storage.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
