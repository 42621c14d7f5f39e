//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Ticket signing key must be at least {0} bytes")]
    SigningKeyTooShort(usize),

    #[error("Side effect timeout must be between 1 and 60000 ms")]
    InvalidSideEffectTimeout,

    #[error("Artifact base path must start with '/'")]
    InvalidArtifactBasePath,

    #[error("Invalid renderer URL format")]
    InvalidRendererUrl,

    #[error("Renderer URL must use HTTPS in production")]
    RendererMustBeHttps,
}
