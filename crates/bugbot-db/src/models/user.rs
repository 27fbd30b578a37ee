//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub user_id: i64,
    pub guild_id: i64,
    pub created_at: DateTime<Utc>,
}
