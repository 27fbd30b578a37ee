//! Settings service
//!
//! Per-guild configuration: channel slots and the manager-role set. Only
//! members with "manage guild" or the configured developer may change them.

use bugbot_core::entities::{Guild, GuildChannel};
use bugbot_core::{Actor, ChannelKind, DomainError, Snowflake};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Guild settings service
pub struct SettingsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SettingsService<'a> {
    /// Create a new SettingsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Point a channel slot at a channel
    ///
    /// The channel must be a text channel or a forum; the suggestions slot
    /// only takes forums.
    #[instrument(skip(self, actor), fields(actor = %actor.user_id))]
    pub async fn set_channel(
        &self,
        actor: &Actor,
        guild_id: Snowflake,
        slot: GuildChannel,
        channel_id: Snowflake,
    ) -> ServiceResult<Guild> {
        PermissionService::new(self.ctx).require_manage_settings(actor)?;

        let kind = self.ctx.platform().channel_kind(channel_id).await?;
        if !kind.accepts_posts() {
            return Err(ServiceError::validation(
                "The channel must be a text channel or a forum.",
            ));
        }
        if slot == GuildChannel::Suggestions && kind != ChannelKind::Forum {
            return Err(ServiceError::validation("The channel must be a forum."));
        }

        let guild = self
            .ctx
            .guild_repo()
            .set_channel(guild_id, slot, Some(channel_id))
            .await?;
        info!(guild_id = %guild_id, slot = slot.column(), channel_id = %channel_id, "Guild channel updated");
        Ok(guild)
    }

    /// Add or remove a manager role
    ///
    /// Adding a role that is already present, or removing one that is not,
    /// changes nothing and reports the conflict.
    #[instrument(skip(self, actor), fields(actor = %actor.user_id))]
    pub async fn set_manager_role(
        &self,
        actor: &Actor,
        guild_id: Snowflake,
        role: Snowflake,
        add: bool,
    ) -> ServiceResult<Guild> {
        PermissionService::new(self.ctx).require_manage_settings(actor)?;

        let repo = self.ctx.guild_repo();
        repo.get_or_create(guild_id).await?;
        let guild = if add {
            repo.add_manager_role(guild_id, role)
                .await?
                .ok_or(DomainError::ManagerRoleExists(role))?
        } else {
            repo.remove_manager_role(guild_id, role)
                .await?
                .ok_or(DomainError::ManagerRoleMissing(role))?
        };
        info!(guild_id = %guild_id, role = %role, add, "Manager roles updated");
        Ok(guild)
    }

    /// Current settings
    #[instrument(skip(self, actor), fields(actor = %actor.user_id))]
    pub async fn view(&self, actor: &Actor, guild_id: Snowflake) -> ServiceResult<Guild> {
        PermissionService::new(self.ctx).require_manage_settings(actor)?;
        Ok(self.ctx.guild_repo().get_or_create(guild_id).await?)
    }
}
