//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Repositories enforce no business rules
//! beyond the storage guards documented on each method.

use async_trait::async_trait;

use crate::entities::{Bug, BugStatus, Guild, GuildChannel, Media, MediaKind, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Guild Repository
// ============================================================================

#[async_trait]
pub trait GuildRepository: Send + Sync {
    /// Find guild by its platform id
    async fn find_by_guild_id(&self, guild_id: Snowflake) -> RepoResult<Option<Guild>>;

    /// Return the guild, inserting an unconfigured record if absent.
    ///
    /// Idempotent: concurrent or repeated calls yield the same row.
    async fn get_or_create(&self, guild_id: Snowflake) -> RepoResult<Guild>;

    /// Set or clear a channel slot
    async fn set_channel(
        &self,
        guild_id: Snowflake,
        slot: GuildChannel,
        channel: Option<Snowflake>,
    ) -> RepoResult<Guild>;

    /// Append a manager role in one atomic step.
    ///
    /// Returns `None` when the role is already in the set.
    async fn add_manager_role(&self, guild_id: Snowflake, role: Snowflake)
        -> RepoResult<Option<Guild>>;

    /// Remove a manager role in one atomic step.
    ///
    /// Returns `None` when the role is not in the set.
    async fn remove_manager_role(
        &self,
        guild_id: Snowflake,
        role: Snowflake,
    ) -> RepoResult<Option<Guild>>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find the guild-scoped record for a platform user
    async fn find(&self, user_id: Snowflake, guild_id: Snowflake) -> RepoResult<Option<User>>;

    /// Find by internal row id
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Return the user record, inserting it if absent.
    ///
    /// The guild record must already exist.
    async fn get_or_create(&self, user_id: Snowflake, guild_id: Snowflake) -> RepoResult<User>;
}

// ============================================================================
// Bug Repository
// ============================================================================

#[async_trait]
pub trait BugRepository: Send + Sync {
    /// Insert a draft (`sent = false`, no message id)
    async fn create_draft(&self, user_id: i64, title: &str, description: &str) -> RepoResult<Bug>;

    /// Insert an already-published bug, or return the existing one for `message_id`
    async fn create_published(
        &self,
        user_id: i64,
        title: &str,
        description: &str,
        message_id: Snowflake,
        status: BugStatus,
    ) -> RepoResult<Bug>;

    /// Publish a draft.
    ///
    /// Only succeeds while the row is still a draft; otherwise returns
    /// `BugAlreadySent`, or `BugNotFound` if the row is gone.
    async fn publish(
        &self,
        id: i64,
        title: &str,
        description: &str,
        message_id: Snowflake,
    ) -> RepoResult<Bug>;

    /// Set the status of a bug
    async fn set_status(&self, id: i64, status: BugStatus) -> RepoResult<()>;

    /// Find a live (not deleted) bug by id
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Bug>>;

    /// Find a live bug by the remote message mirroring it
    async fn find_by_message_id(&self, message_id: Snowflake) -> RepoResult<Option<Bug>>;

    /// Replace title and description
    async fn update_title_description(
        &self,
        id: i64,
        title: &str,
        description: &str,
    ) -> RepoResult<()>;

    /// Tombstone a bug; it is invisible to every read afterwards
    async fn delete(&self, id: i64) -> RepoResult<()>;
}

// ============================================================================
// Media Repository
// ============================================================================

#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Store a media blob
    async fn create(
        &self,
        kind: MediaKind,
        data: &[u8],
        user_id: i64,
        bug_id: Option<i64>,
    ) -> RepoResult<Media>;

    /// Media attached to a bug, if any
    async fn find_by_bug(&self, bug_id: i64) -> RepoResult<Option<Media>>;
}
