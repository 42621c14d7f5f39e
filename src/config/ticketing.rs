//! Ticketing configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::attendance::LeavePolicy;
use crate::domain::ticket::DEFAULT_ARTIFACT_BASE_PATH;

/// Shortest accepted HMAC key for verification tokens.
pub const MIN_SIGNING_KEY_LEN: usize = 32;

/// Ticket issuance and side-effect settings
#[derive(Debug, Clone, Deserialize)]
pub struct TicketingConfig {
    /// HMAC key that signs verification tokens
    pub signing_key: SecretString,

    /// Upper bound for each notification or render call
    #[serde(default = "default_side_effect_timeout")]
    pub side_effect_timeout_ms: u64,

    /// What leaving an event does to the leaver's ticket
    #[serde(default)]
    pub leave_policy: LeavePolicy,

    /// Directory prefix for rendered ticket documents
    #[serde(default = "default_artifact_base_path")]
    pub artifact_base_path: String,
}

impl TicketingConfig {
    pub fn side_effect_timeout(&self) -> Duration {
        Duration::from_millis(self.side_effect_timeout_ms)
    }

    /// Validate ticketing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let key = self.signing_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("TICKETING__SIGNING_KEY"));
        }
        if key.len() < MIN_SIGNING_KEY_LEN {
            return Err(ValidationError::SigningKeyTooShort(MIN_SIGNING_KEY_LEN));
        }
        if self.side_effect_timeout_ms == 0 || self.side_effect_timeout_ms > 60_000 {
            return Err(ValidationError::InvalidSideEffectTimeout);
        }
        if !self.artifact_base_path.starts_with('/') {
            return Err(ValidationError::InvalidArtifactBasePath);
        }
        Ok(())
    }
}

fn default_side_effect_timeout() -> u64 {
    5_000
}

fn default_artifact_base_path() -> String {
    DEFAULT_ARTIFACT_BASE_PATH.to_string()
}
