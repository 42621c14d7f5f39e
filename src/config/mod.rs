//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `GATHERUP` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use gatherup::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod renderer;
mod server;
mod ticketing;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use renderer::RendererConfig;
pub use server::{Environment, LogFormat, ServerConfig};
pub use ticketing::{TicketingConfig, MIN_SIGNING_KEY_LEN};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Ticket credentials, side-effect bounds and leave policy
    pub ticketing: TicketingConfig,

    /// Optional document rendering service
    #[serde(default)]
    pub renderer: RendererConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` if present (development)
    /// 2. Reads variables with the `GATHERUP` prefix
    /// 3. Splits nested keys on `__`
    ///
    /// # Environment Variable Format
    ///
    /// - `GATHERUP__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `GATHERUP__TICKETING__LEAVE_POLICY=revoke_live_ticket`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GATHERUP")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.ticketing.validate()?;
        self.renderer.validate(&self.server.environment)?;
        Ok(())
    }
}
