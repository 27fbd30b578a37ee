//! Bug database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Postgres `bug_status` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "bug_status", rename_all = "lowercase")]
pub enum BugStatusModel {
    Open,
    Closed,
}

/// Database model for bugs table
#[derive(Debug, Clone, FromRow)]
pub struct BugModel {
    pub id: i64,
    pub user_id: i64,
    pub status: BugStatusModel,
    pub title: String,
    pub description: String,
    pub sent: bool,
    pub message_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl BugModel {
    /// Check if bug is tombstoned
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
