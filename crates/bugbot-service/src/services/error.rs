//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use std::fmt;

use bugbot_core::{DomainError, PlatformError};

/// Notice shown when an interaction fails for an unexpected reason
pub const GENERIC_ERROR_NOTICE: &str = "There was an error while executing this command!";

/// Coarse failure category, logged with every rejected interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Validation,
    Authorization,
    Conflict,
    Platform,
    Internal,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::Authorization => "authorization",
            Self::Conflict => "conflict",
            Self::Platform => "platform",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Chat platform call failed on a step that cannot be skipped
    Platform(PlatformError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Permission denied; `permission` completes "You do not have permission to ..."
    PermissionDenied { permission: String },

    /// Validation error, shown to the actor verbatim
    Validation(String),

    /// Request conflicts with the current state
    Conflict(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Platform(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::PermissionDenied { permission } => {
                write!(f, "Permission denied: {permission}")
            }
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Platform(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(permission: impl Into<String>) -> Self {
        Self::PermissionDenied {
            permission: permission.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Error code for structured logs
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Platform(_) => "PLATFORM_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::PermissionDenied { .. } => "MISSING_PERMISSIONS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Which part of the error taxonomy this failure belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) if e.is_not_found() => ErrorCategory::NotFound,
            Self::Domain(e) if e.is_validation() => ErrorCategory::Validation,
            Self::Domain(e) if e.is_authorization() => ErrorCategory::Authorization,
            Self::Domain(e) if e.is_conflict() => ErrorCategory::Conflict,
            Self::Domain(_) | Self::Internal(_) => ErrorCategory::Internal,
            Self::Platform(_) => ErrorCategory::Platform,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::PermissionDenied { .. } => ErrorCategory::Authorization,
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Conflict(_) => ErrorCategory::Conflict,
        }
    }

    /// Short notice for the actor, or `None` when only the generic notice applies
    pub fn user_message(&self) -> Option<String> {
        let message = match self {
            Self::Domain(e) => domain_message(e)?,
            Self::NotFound { resource, .. } => format!(":x: {resource} not found"),
            Self::PermissionDenied { permission } => {
                format!(":x: You do not have permission to {permission}")
            }
            Self::Validation(msg) => msg.clone(),
            Self::Conflict(msg) => format!(":x: {msg}"),
            Self::Platform(_) | Self::Internal(_) => return None,
        };
        Some(message)
    }
}

fn domain_message(err: &DomainError) -> Option<String> {
    let message = match err {
        DomainError::BugNotFound(_)
        | DomainError::BugDeleted(_)
        | DomainError::BugMessageNotFound(_)
        | DomainError::InvalidCustomId(_) => ":x: Bug not found".to_string(),
        DomainError::GuildNotFound(_) | DomainError::UserNotFound(_) => {
            ":x: User or guild not found".to_string()
        }
        DomainError::ChannelNotConfigured(label) => format!("{label} not set up."),
        DomainError::MissingFields => "Please fill out all fields.".to_string(),
        DomainError::ReportTooLong { .. } => "Title must be less than 256 characters and description must be less than 4,000 characters.".to_string(),
        DomainError::TitleLength { min, max } => {
            format!("Title must be between {min} and {max} characters.")
        }
        DomainError::ValidationError(msg) => msg.clone(),
        DomainError::UnsupportedMedia(_) => {
            "Invalid media type. Please provide either a .png or .mp4 file.".to_string()
        }
        DomainError::MediaTooLarge { max_mb } => {
            format!("Media file is too large. Please keep it under {max_mb}MB.")
        }
        DomainError::MissingPermission(_) => {
            "You do not have the required permissions to use this command.".to_string()
        }
        DomainError::BugAlreadySent(_) => ":x: Bug already sent".to_string(),
        DomainError::BugNotSent(id) => format!(":x: Bug #{id} has not been sent yet"),
        DomainError::BugAlreadyOpen(id) => format!(":x: Bug #{id} is already open"),
        DomainError::BugAlreadyClosed(id) => format!(":x: Bug #{id} is already closed"),
        DomainError::ManagerRoleExists(_) => {
            "The role already exists as a manager role.".to_string()
        }
        DomainError::ManagerRoleMissing(_) => {
            "The role does not exist as a manager role.".to_string()
        }
        DomainError::DatabaseError(_) | DomainError::InternalError(_) => return None,
    };
    Some(message)
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<PlatformError> for ServiceError {
    fn from(err: PlatformError) -> Self {
        Self::Platform(err)
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
