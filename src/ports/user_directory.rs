//! User directory port.
//!
//! Resolves the stable identifiers supplied by the identity provider into
//! the minimal profile the engine needs for messages and rendering.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::UserProfile;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns `None` if the directory has no profile for this user.
    async fn find_profile(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError>;
}
