//! PostgreSQL implementation of BugRepository
//!
//! Deleted bugs are tombstoned via `deleted_at` and filtered from every read.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use bugbot_core::entities::{Bug, BugStatus};
use bugbot_core::error::DomainError;
use bugbot_core::traits::{BugRepository, RepoResult};
use bugbot_core::value_objects::Snowflake;

use crate::models::{BugModel, BugStatusModel};

use super::error::{bug_not_found, map_db_error, map_foreign_key_violation, user_not_found};

const BUG_COLUMNS: &str =
    "id, user_id, status, title, description, sent, message_id, created_at, deleted_at";

/// PostgreSQL implementation of BugRepository
#[derive(Clone)]
pub struct PgBugRepository {
    pool: PgPool,
}

impl PgBugRepository {
    /// Create a new PgBugRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BugRepository for PgBugRepository {
    #[instrument(skip(self, description))]
    async fn create_draft(&self, user_id: i64, title: &str, description: &str) -> RepoResult<Bug> {
        let model = sqlx::query_as::<_, BugModel>(&format!(
            r"
            INSERT INTO bugs (user_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING {BUG_COLUMNS}
            "
        ))
        .bind(user_id)
        .bind(title)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || user_not_found(user_id)))?;

        Ok(Bug::from(model))
    }

    #[instrument(skip(self, description))]
    async fn create_published(
        &self,
        user_id: i64,
        title: &str,
        description: &str,
        message_id: Snowflake,
        status: BugStatus,
    ) -> RepoResult<Bug> {
        // Adopting the same message twice returns the first row
        let model = sqlx::query_as::<_, BugModel>(&format!(
            r"
            INSERT INTO bugs (user_id, title, description, sent, message_id, status)
            VALUES ($1, $2, $3, TRUE, $4, $5)
            ON CONFLICT (message_id) DO UPDATE SET message_id = EXCLUDED.message_id
            RETURNING {BUG_COLUMNS}
            "
        ))
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(message_id.into_inner())
        .bind(BugStatusModel::from(status))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || user_not_found(user_id)))?;

        if model.is_deleted() {
            return Err(DomainError::BugDeleted(model.id));
        }
        Ok(Bug::from(model))
    }

    #[instrument(skip(self, description))]
    async fn publish(
        &self,
        id: i64,
        title: &str,
        description: &str,
        message_id: Snowflake,
    ) -> RepoResult<Bug> {
        // Guarded on sent = FALSE so a draft is published at most once
        let model = sqlx::query_as::<_, BugModel>(&format!(
            r"
            UPDATE bugs
            SET title = $2, description = $3, sent = TRUE, message_id = $4
            WHERE id = $1 AND sent = FALSE AND deleted_at IS NULL
            RETURNING {BUG_COLUMNS}
            "
        ))
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(message_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match model {
            Some(model) => Ok(Bug::from(model)),
            None => match self.find_by_id(id).await? {
                Some(_) => Err(DomainError::BugAlreadySent(id)),
                None => Err(bug_not_found(id)),
            },
        }
    }

    #[instrument(skip(self))]
    async fn set_status(&self, id: i64, status: BugStatus) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE bugs
            SET status = $2
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .bind(BugStatusModel::from(status))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(bug_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Bug>> {
        let result = sqlx::query_as::<_, BugModel>(&format!(
            "SELECT {BUG_COLUMNS} FROM bugs WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Bug::from))
    }

    #[instrument(skip(self))]
    async fn find_by_message_id(&self, message_id: Snowflake) -> RepoResult<Option<Bug>> {
        let result = sqlx::query_as::<_, BugModel>(&format!(
            "SELECT {BUG_COLUMNS} FROM bugs WHERE message_id = $1 AND deleted_at IS NULL"
        ))
        .bind(message_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Bug::from))
    }

    #[instrument(skip(self, description))]
    async fn update_title_description(
        &self,
        id: i64,
        title: &str,
        description: &str,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE bugs
            SET title = $2, description = $3
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(bug_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE bugs
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(bug_not_found(id));
        }

        Ok(())
    }
}
