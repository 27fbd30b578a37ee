//! User entity - a platform user as seen inside one guild

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Guild-scoped user record
///
/// The same platform account has one record per guild it interacts in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Internal row id, referenced by bugs and media
    pub id: i64,
    /// Platform user id
    pub user_id: Snowflake,
    /// Platform guild id of the owning guild
    pub guild_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: i64, user_id: Snowflake, guild_id: Snowflake) -> Self {
        Self {
            id,
            user_id,
            guild_id,
            created_at: Utc::now(),
        }
    }

    /// Mention markup for this user
    pub fn mention(&self) -> String {
        self.user_id.user_mention()
    }
}
