//! Permission service
//!
//! The authorization policy for bug moderation, highlights and settings.
//! Guild records are re-read on every check so manager-role changes apply
//! immediately.

use bugbot_core::entities::{Bug, Guild};
use bugbot_core::{Actor, DomainError, Permissions, Snowflake};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::identity::Identity;

/// Permission service for access control
pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    /// Create a new PermissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Current guild record
    async fn fresh_guild(&self, guild_id: Snowflake) -> ServiceResult<Guild> {
        self.ctx
            .guild_repo()
            .find_by_guild_id(guild_id)
            .await?
            .ok_or_else(|| DomainError::GuildNotFound(guild_id).into())
    }

    /// Check if the actor holds one of the guild's manager roles
    #[instrument(skip(self, actor), fields(actor = %actor.user_id))]
    pub async fn is_manager(&self, actor: &Actor, guild_id: Snowflake) -> ServiceResult<bool> {
        let guild = self.fresh_guild(guild_id).await?;
        Ok(guild.has_manager_role(&actor.role_ids))
    }

    /// Check if the actor may close, reopen, edit or delete a bug
    ///
    /// Owners always may; anyone else needs a manager role.
    #[instrument(skip(self, actor, identity, bug), fields(actor = %actor.user_id, bug_id = bug.id))]
    pub async fn can_modify_bug(
        &self,
        actor: &Actor,
        identity: &Identity,
        bug: &Bug,
    ) -> ServiceResult<bool> {
        if bug.is_owned_by(identity.user.id) {
            debug!("Actor owns the bug");
            return Ok(true);
        }
        self.is_manager(actor, identity.guild.guild_id).await
    }

    /// Require bug modification rights; `action` completes the denial notice
    pub async fn require_modify_bug(
        &self,
        actor: &Actor,
        identity: &Identity,
        bug: &Bug,
        action: &str,
    ) -> ServiceResult<()> {
        if !self.can_modify_bug(actor, identity, bug).await? {
            return Err(ServiceError::permission_denied(action));
        }
        Ok(())
    }

    /// Require a manager role
    pub async fn require_manager(
        &self,
        actor: &Actor,
        guild_id: Snowflake,
        action: &str,
    ) -> ServiceResult<()> {
        if !self.is_manager(actor, guild_id).await? {
            return Err(ServiceError::permission_denied(action));
        }
        Ok(())
    }

    /// Check if the actor may change guild settings
    pub fn can_manage_settings(&self, actor: &Actor) -> bool {
        actor.permissions.has(Permissions::MANAGE_GUILD)
            || self.ctx.settings().developer_id == Some(actor.user_id)
    }

    /// Require settings rights
    pub fn require_manage_settings(&self, actor: &Actor) -> ServiceResult<()> {
        if self.can_manage_settings(actor) {
            Ok(())
        } else {
            Err(DomainError::MissingPermission("MANAGE_GUILD".to_string()).into())
        }
    }
}
