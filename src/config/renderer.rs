//! Ticket renderer configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Document rendering service. Absent `base_url` disables rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    /// Rendering service root, e.g. `https://render.internal`
    pub base_url: Option<String>,

    /// Bearer key sent with every render request
    pub api_key: Option<SecretString>,

    /// HTTP client timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl RendererConfig {
    pub fn is_enabled(&self) -> bool {
        self.base_url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate renderer configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let Some(url) = self.base_url.as_deref().filter(|url| !url.trim().is_empty()) else {
            return Ok(());
        };
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidRendererUrl);
        }
        if environment.requires_https() && !url.starts_with("https://") {
            return Err(ValidationError::RendererMustBeHttps);
        }
        Ok(())
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> RendererConfig {
        RendererConfig {
            base_url: Some(url.to_string()),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }

    #[test]
    fn test_disabled_without_url() {
        let config = RendererConfig::default();
        assert!(!config.is_enabled());
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_blank_url_counts_as_disabled() {
        assert!(!with_url("  ").is_enabled());
    }

    #[test]
    fn test_rejects_non_http_url() {
        assert_eq!(
            with_url("ftp://render").validate(&Environment::Development),
            Err(ValidationError::InvalidRendererUrl)
        );
    }

    #[test]
    fn test_production_requires_https() {
        let config = with_url("http://render.local");
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::RendererMustBeHttps)
        );
        assert!(with_url("https://render.example.com")
            .validate(&Environment::Production)
            .is_ok());
    }
}
