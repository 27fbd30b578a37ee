//! Service context - dependency container for services
//!
//! Holds the repositories, the chat platform port and the process-wide
//! settings the services read.

use std::sync::Arc;

use bugbot_common::AppConfig;
use bugbot_core::traits::{BugRepository, GuildRepository, MediaRepository, UserRepository};
use bugbot_core::{ChatPlatform, Snowflake};

use super::error::{ServiceError, ServiceResult};

/// Default upper bound for a report attachment (90 MB)
pub const DEFAULT_MAX_MEDIA_BYTES: u64 = 90 * 1024 * 1024;

/// Process-wide settings consumed by the services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// User allowed to change guild settings without "manage guild"
    pub developer_id: Option<Snowflake>,
    /// Largest attachment accepted for reports and highlights
    pub max_media_bytes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            developer_id: None,
            max_media_bytes: DEFAULT_MAX_MEDIA_BYTES,
        }
    }
}

impl From<&AppConfig> for ServiceSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            developer_id: config.discord.developer_id,
            max_media_bytes: config.media.max_bytes(),
        }
    }
}

impl ServiceSettings {
    /// Media limit in whole megabytes, for notices
    pub fn max_media_mb(&self) -> u64 {
        self.max_media_bytes / (1024 * 1024)
    }
}

/// Service context containing all dependencies
///
/// Cheap to clone; every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    guild_repo: Arc<dyn GuildRepository>,
    user_repo: Arc<dyn UserRepository>,
    bug_repo: Arc<dyn BugRepository>,
    media_repo: Arc<dyn MediaRepository>,

    // Remote side
    platform: Arc<dyn ChatPlatform>,

    settings: ServiceSettings,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        guild_repo: Arc<dyn GuildRepository>,
        user_repo: Arc<dyn UserRepository>,
        bug_repo: Arc<dyn BugRepository>,
        media_repo: Arc<dyn MediaRepository>,
        platform: Arc<dyn ChatPlatform>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            guild_repo,
            user_repo,
            bug_repo,
            media_repo,
            platform,
            settings,
        }
    }

    // === Repositories ===

    /// Get the guild repository
    pub fn guild_repo(&self) -> &dyn GuildRepository {
        self.guild_repo.as_ref()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the bug repository
    pub fn bug_repo(&self) -> &dyn BugRepository {
        self.bug_repo.as_ref()
    }

    /// Get the media repository
    pub fn media_repo(&self) -> &dyn MediaRepository {
        self.media_repo.as_ref()
    }

    // === Platform ===

    /// Get the chat platform port
    pub fn platform(&self) -> &dyn ChatPlatform {
        self.platform.as_ref()
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("platform", &"dyn ChatPlatform")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    guild_repo: Option<Arc<dyn GuildRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    bug_repo: Option<Arc<dyn BugRepository>>,
    media_repo: Option<Arc<dyn MediaRepository>>,
    platform: Option<Arc<dyn ChatPlatform>>,
    settings: ServiceSettings,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guild_repo(mut self, repo: Arc<dyn GuildRepository>) -> Self {
        self.guild_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn bug_repo(mut self, repo: Arc<dyn BugRepository>) -> Self {
        self.bug_repo = Some(repo);
        self
    }

    pub fn media_repo(mut self, repo: Arc<dyn MediaRepository>) -> Self {
        self.media_repo = Some(repo);
        self
    }

    pub fn platform(mut self, platform: Arc<dyn ChatPlatform>) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.guild_repo
                .ok_or_else(|| ServiceError::validation("guild_repo is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.bug_repo
                .ok_or_else(|| ServiceError::validation("bug_repo is required"))?,
            self.media_repo
                .ok_or_else(|| ServiceError::validation("media_repo is required"))?,
            self.platform
                .ok_or_else(|| ServiceError::validation("platform is required"))?,
            self.settings,
        ))
    }
}
