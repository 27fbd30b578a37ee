//! Identity service
//!
//! Lazily provisions the guild record and the guild-scoped user record for
//! every interaction.

use bugbot_core::entities::{Guild, User};
use bugbot_core::Snowflake;
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Guild and user records of the actor behind an interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub guild: Guild,
    pub user: User,
}

/// Identity provisioning service
pub struct IdentityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IdentityService<'a> {
    /// Create a new IdentityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get or create the guild record
    #[instrument(skip(self))]
    pub async fn ensure_guild(&self, guild_id: Snowflake) -> ServiceResult<Guild> {
        let guild = self.ctx.guild_repo().get_or_create(guild_id).await?;
        debug!(guild_id = %guild_id, row_id = guild.id, "Guild provisioned");
        Ok(guild)
    }

    /// Get or create the user record, provisioning its guild first
    #[instrument(skip(self))]
    pub async fn ensure_user(&self, user_id: Snowflake, guild_id: Snowflake) -> ServiceResult<User> {
        Ok(self.provision(user_id, guild_id).await?.user)
    }

    /// Provision both records for an interaction
    #[instrument(skip(self))]
    pub async fn provision(
        &self,
        user_id: Snowflake,
        guild_id: Snowflake,
    ) -> ServiceResult<Identity> {
        let guild = self.ensure_guild(guild_id).await?;
        let user = self.ctx.user_repo().get_or_create(user_id, guild_id).await?;
        debug!(user_id = %user_id, guild_id = %guild_id, row_id = user.id, "User provisioned");
        Ok(Identity { guild, user })
    }
}
