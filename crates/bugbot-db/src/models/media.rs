//! Media database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Postgres `media_kind` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "media_kind", rename_all = "lowercase")]
pub enum MediaKindModel {
    Image,
    Video,
}

/// Database model for media table
#[derive(Debug, Clone, FromRow)]
pub struct MediaModel {
    pub id: i64,
    pub media_type: MediaKindModel,
    pub data: Vec<u8>,
    pub user_id: i64,
    pub bug_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
