//! Read-only view of a user as supplied by the identity directory.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
}

impl UserProfile {
    pub fn new(id: UserId, full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            email: email.into(),
        }
    }

    /// Name used in organizer-facing messages; falls back to the id.
    pub fn display_name(&self) -> &str {
        let name = self.full_name.trim();
        if name.is_empty() {
            self.id.as_str()
        } else {
            name
        }
    }
}
