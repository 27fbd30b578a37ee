//! Handler error types

use bugbot_core::{DomainError, PlatformError};
use bugbot_service::{ErrorCategory, ServiceError};
use thiserror::Error;

/// Handler error type
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Interaction is missing data the handler needs
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Service error
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Responding to the interaction failed
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

impl From<DomainError> for HandlerError {
    fn from(err: DomainError) -> Self {
        Self::Service(ServiceError::from(err))
    }
}

impl HandlerError {
    /// Notice to show the actor, or `None` for faults that get the generic notice
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Service(e) => e.user_message(),
            Self::InvalidPayload(_) | Self::Platform(_) => None,
        }
    }

    /// Error code for structured logs
    pub fn error_code(&self) -> &str {
        match self {
            Self::Service(e) => e.error_code(),
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::Platform(_) => "PLATFORM_ERROR",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Service(e) => e.category(),
            Self::InvalidPayload(_) => ErrorCategory::Internal,
            Self::Platform(_) => ErrorCategory::Platform,
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
