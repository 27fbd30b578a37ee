//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use bugbot_core::entities::User;
use bugbot_core::traits::{RepoResult, UserRepository};
use bugbot_core::value_objects::Snowflake;

use crate::models::UserModel;

use super::error::{guild_not_found, map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find(&self, user_id: Snowflake, guild_id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, user_id, guild_id, created_at
            FROM users
            WHERE user_id = $1 AND guild_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(guild_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, user_id, guild_id, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn get_or_create(&self, user_id: Snowflake, guild_id: Snowflake) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (user_id, guild_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, guild_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, guild_id, created_at
            ",
        )
        .bind(user_id.into_inner())
        .bind(guild_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || guild_not_found(guild_id)))?;

        Ok(User::from(model))
    }
}
