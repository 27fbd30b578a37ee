//! Guild database model

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for guilds table
#[derive(Debug, Clone, FromRow)]
pub struct GuildModel {
    pub id: i64,
    pub guild_id: i64,
    pub bug_channel: Option<i64>,
    pub highlights_channel: Option<i64>,
    pub suggestion_forum: Option<i64>,
    pub commands_channel: Option<i64>,
    pub announcements_channel: Option<i64>,
    /// JSON array of role ids
    pub manager_roles: Json<Vec<i64>>,
    pub created_at: DateTime<Utc>,
}
