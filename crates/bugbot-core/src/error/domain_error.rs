//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Guild not found: {0}")]
    GuildNotFound(Snowflake),

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Bug not found: {0}")]
    BugNotFound(i64),

    #[error("No bug is linked to message {0}")]
    BugMessageNotFound(Snowflake),

    #[error("{0} is not configured")]
    ChannelNotConfigured(&'static str),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Title and description are required")]
    MissingFields,

    #[error("Title must be less than {title_max} characters and description must be less than {description_max} characters")]
    ReportTooLong {
        title_max: usize,
        description_max: usize,
    },

    #[error("Title must be between {min} and {max} characters")]
    TitleLength { min: usize, max: usize },

    #[error("Invalid custom id payload: {0}")]
    InvalidCustomId(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Media too large: max {max_mb} MB")]
    MediaTooLarge { max_mb: u64 },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing permission: {0}")]
    MissingPermission(String),

    // =========================================================================
    // Conflict / State Errors
    // =========================================================================
    #[error("Bug {0} has already been sent")]
    BugAlreadySent(i64),

    #[error("Bug {0} has not been sent")]
    BugNotSent(i64),

    #[error("Bug {0} is already open")]
    BugAlreadyOpen(i64),

    #[error("Bug {0} is already closed")]
    BugAlreadyClosed(i64),

    #[error("Bug {0} has been deleted")]
    BugDeleted(i64),

    #[error("Role {0} is already a manager role")]
    ManagerRoleExists(Snowflake),

    #[error("Role {0} is not a manager role")]
    ManagerRoleMissing(Snowflake),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Stable error code, used in structured logs
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::GuildNotFound(_) => "UNKNOWN_GUILD",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::BugNotFound(_) => "UNKNOWN_BUG",
            Self::BugMessageNotFound(_) => "UNKNOWN_BUG_MESSAGE",
            Self::ChannelNotConfigured(_) => "CHANNEL_NOT_CONFIGURED",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MissingFields => "MISSING_FIELDS",
            Self::ReportTooLong { .. } => "REPORT_TOO_LONG",
            Self::TitleLength { .. } => "TITLE_LENGTH",
            Self::InvalidCustomId(_) => "INVALID_CUSTOM_ID",
            Self::UnsupportedMedia(_) => "UNSUPPORTED_MEDIA",
            Self::MediaTooLarge { .. } => "MEDIA_TOO_LARGE",

            // Authorization
            Self::MissingPermission(_) => "MISSING_PERMISSIONS",

            // Conflict
            Self::BugAlreadySent(_) => "BUG_ALREADY_SENT",
            Self::BugNotSent(_) => "BUG_NOT_SENT",
            Self::BugAlreadyOpen(_) => "BUG_ALREADY_OPEN",
            Self::BugAlreadyClosed(_) => "BUG_ALREADY_CLOSED",
            Self::BugDeleted(_) => "BUG_DELETED",
            Self::ManagerRoleExists(_) => "MANAGER_ROLE_EXISTS",
            Self::ManagerRoleMissing(_) => "MANAGER_ROLE_MISSING",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::GuildNotFound(_)
                | Self::UserNotFound(_)
                | Self::BugNotFound(_)
                | Self::BugMessageNotFound(_)
                | Self::ChannelNotConfigured(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::MissingFields
                | Self::ReportTooLong { .. }
                | Self::TitleLength { .. }
                | Self::InvalidCustomId(_)
                | Self::UnsupportedMedia(_)
                | Self::MediaTooLarge { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::MissingPermission(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::BugAlreadySent(_)
                | Self::BugNotSent(_)
                | Self::BugAlreadyOpen(_)
                | Self::BugAlreadyClosed(_)
                | Self::BugDeleted(_)
                | Self::ManagerRoleExists(_)
                | Self::ManagerRoleMissing(_)
        )
    }
}
