//! Application error types
//!
//! Errors that can stop the bot while it starts up or runs. Interaction
//! failures never reach this type; the router answers them.

use bugbot_core::DomainError;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Chat platform client errors
    #[error("Platform client error: {0}")]
    Platform(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Process exit code for this error
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            // EX_CONFIG
            Self::Config(_) => 78,
            // EX_UNAVAILABLE
            Self::Database(_) | Self::Platform(_) => 69,
            Self::Domain(_) | Self::Internal(_) => 1,
        }
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
