//! Error handling utilities for repositories

use bugbot_core::error::DomainError;
use bugbot_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for a foreign key violation and return appropriate error or fallback
pub fn map_foreign_key_violation<F>(e: SqlxError, on_violation: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_violation();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "guild not found" error
pub fn guild_not_found(id: Snowflake) -> DomainError {
    DomainError::GuildNotFound(id)
}

/// Create a "user not found" error
pub fn user_not_found(id: i64) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "bug not found" error
pub fn bug_not_found(id: i64) -> DomainError {
    DomainError::BugNotFound(id)
}
