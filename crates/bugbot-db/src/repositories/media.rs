//! PostgreSQL implementation of MediaRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use bugbot_core::entities::{Media, MediaKind};
use bugbot_core::traits::{MediaRepository, RepoResult};

use crate::models::{MediaKindModel, MediaModel};

use super::error::{map_db_error, map_foreign_key_violation, user_not_found};

/// PostgreSQL implementation of MediaRepository
#[derive(Clone)]
pub struct PgMediaRepository {
    pool: PgPool,
}

impl PgMediaRepository {
    /// Create a new PgMediaRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepository for PgMediaRepository {
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    async fn create(
        &self,
        kind: MediaKind,
        data: &[u8],
        user_id: i64,
        bug_id: Option<i64>,
    ) -> RepoResult<Media> {
        let model = sqlx::query_as::<_, MediaModel>(
            r"
            INSERT INTO media (media_type, data, user_id, bug_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, media_type, data, user_id, bug_id, created_at
            ",
        )
        .bind(MediaKindModel::from(kind))
        .bind(data)
        .bind(user_id)
        .bind(bug_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || user_not_found(user_id)))?;

        Ok(Media::from(model))
    }

    #[instrument(skip(self))]
    async fn find_by_bug(&self, bug_id: i64) -> RepoResult<Option<Media>> {
        let result = sqlx::query_as::<_, MediaModel>(
            r"
            SELECT id, media_type, data, user_id, bug_id, created_at
            FROM media
            WHERE bug_id = $1
            ORDER BY id
            LIMIT 1
            ",
        )
        .bind(bug_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Media::from))
    }
}
