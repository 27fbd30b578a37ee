//! PostgreSQL implementation of GuildRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use bugbot_core::entities::{Guild, GuildChannel};
use bugbot_core::traits::{GuildRepository, RepoResult};
use bugbot_core::value_objects::Snowflake;

use crate::models::GuildModel;

use super::error::{guild_not_found, map_db_error};

const GUILD_COLUMNS: &str = "id, guild_id, bug_channel, highlights_channel, suggestion_forum, \
     commands_channel, announcements_channel, manager_roles, created_at";

/// PostgreSQL implementation of GuildRepository
#[derive(Clone)]
pub struct PgGuildRepository {
    pool: PgPool,
}

impl PgGuildRepository {
    /// Create a new PgGuildRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuildRepository for PgGuildRepository {
    #[instrument(skip(self))]
    async fn find_by_guild_id(&self, guild_id: Snowflake) -> RepoResult<Option<Guild>> {
        let result = sqlx::query_as::<_, GuildModel>(&format!(
            "SELECT {GUILD_COLUMNS} FROM guilds WHERE guild_id = $1"
        ))
        .bind(guild_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Guild::from))
    }

    #[instrument(skip(self))]
    async fn get_or_create(&self, guild_id: Snowflake) -> RepoResult<Guild> {
        // The no-op update makes RETURNING yield the existing row on conflict
        let model = sqlx::query_as::<_, GuildModel>(&format!(
            r"
            INSERT INTO guilds (guild_id)
            VALUES ($1)
            ON CONFLICT (guild_id) DO UPDATE SET guild_id = EXCLUDED.guild_id
            RETURNING {GUILD_COLUMNS}
            "
        ))
        .bind(guild_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Guild::from(model))
    }

    #[instrument(skip(self))]
    async fn set_channel(
        &self,
        guild_id: Snowflake,
        slot: GuildChannel,
        channel: Option<Snowflake>,
    ) -> RepoResult<Guild> {
        // Column names come from a closed enum, never from input
        let model = sqlx::query_as::<_, GuildModel>(&format!(
            "UPDATE guilds SET {column} = $2 WHERE guild_id = $1 RETURNING {GUILD_COLUMNS}",
            column = slot.column()
        ))
        .bind(guild_id.into_inner())
        .bind(channel.map(Snowflake::into_inner))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        model.map(Guild::from).ok_or_else(|| guild_not_found(guild_id))
    }

    #[instrument(skip(self))]
    async fn add_manager_role(
        &self,
        guild_id: Snowflake,
        role: Snowflake,
    ) -> RepoResult<Option<Guild>> {
        let model = sqlx::query_as::<_, GuildModel>(&format!(
            r#"
            UPDATE guilds
            SET manager_roles = manager_roles || jsonb_build_array($2::BIGINT)
            WHERE guild_id = $1
              AND NOT manager_roles @> jsonb_build_array($2::BIGINT)
            RETURNING {GUILD_COLUMNS}
            "#
        ))
        .bind(guild_id.into_inner())
        .bind(role.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(model.map(Guild::from))
    }

    #[instrument(skip(self))]
    async fn remove_manager_role(
        &self,
        guild_id: Snowflake,
        role: Snowflake,
    ) -> RepoResult<Option<Guild>> {
        let model = sqlx::query_as::<_, GuildModel>(&format!(
            r#"
            UPDATE guilds
            SET manager_roles = COALESCE(
                (
                    SELECT jsonb_agg(r.value ORDER BY r.position)
                    FROM jsonb_array_elements(manager_roles) WITH ORDINALITY AS r(value, position)
                    WHERE r.value <> to_jsonb($2::BIGINT)
                ),
                '[]'::jsonb
            )
            WHERE guild_id = $1
              AND manager_roles @> jsonb_build_array($2::BIGINT)
            RETURNING {GUILD_COLUMNS}
            "#
        ))
        .bind(guild_id.into_inner())
        .bind(role.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(model.map(Guild::from))
    }
}
