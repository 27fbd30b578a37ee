//! Bug service
//!
//! Drives a bug report from draft to published, through close/reopen and
//! edit, to deletion. Every mutating step is authorized and validated before
//! the first write. The stored record is authoritative: once it has been
//! written, remote message sync is best-effort and failures are only logged.

use bugbot_core::entities::{Bug, BugStatus, GuildChannel, MediaKind, User};
use bugbot_core::{
    channel_url, message_url, Actor, DomainError, Embed, MessageEdit, ModalForm, OutgoingMessage,
    RemoteAttachment, RemoteMessage, Snowflake, MAX_DESCRIPTION_LEN,
};
use tracing::{debug, info, instrument, warn};

use crate::dto::{BugForm, BugReference, Draft, DraftRequest, Published, Resolved};
use crate::render;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::identity::{Identity, IdentityService};
use super::permission::PermissionService;

/// Bug lifecycle service
pub struct BugService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BugService<'a> {
    /// Create a new BugService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn permissions(&self) -> PermissionService<'a> {
        PermissionService::new(self.ctx)
    }

    /// Load a live bug reported in the identity's guild, with its reporter
    async fn load(&self, identity: &Identity, bug_id: i64) -> ServiceResult<(Bug, User)> {
        let bug = self
            .ctx
            .bug_repo()
            .find_by_id(bug_id)
            .await?
            .ok_or(DomainError::BugNotFound(bug_id))?;
        let reporter = self
            .ctx
            .user_repo()
            .find_by_id(bug.user_id)
            .await?
            .filter(|user| user.guild_id == identity.guild.guild_id)
            .ok_or(DomainError::BugNotFound(bug_id))?;
        Ok((bug, reporter))
    }

    // ========================================================================
    // Draft
    // ========================================================================

    /// Create a draft from the report command, storing an optional attachment
    ///
    /// The attachment is checked and downloaded before anything is written.
    #[instrument(skip(self, identity, request, attachment), fields(user_id = identity.user.id))]
    pub async fn create_draft(
        &self,
        identity: &Identity,
        request: DraftRequest,
        attachment: Option<&RemoteAttachment>,
    ) -> ServiceResult<Draft> {
        request.check()?;

        let upload = match attachment {
            Some(attachment) => Some(self.fetch_media(attachment).await?),
            None => None,
        };

        let bug = self
            .ctx
            .bug_repo()
            .create_draft(identity.user.id, &request.title, "")
            .await?;

        let media = match upload {
            Some((kind, data)) => Some(
                self.ctx
                    .media_repo()
                    .create(kind, &data, identity.user.id, Some(bug.id))
                    .await?,
            ),
            None => None,
        };

        info!(bug_id = bug.id, has_media = media.is_some(), "Draft created");
        Ok(Draft { bug, media })
    }

    async fn fetch_media(&self, attachment: &RemoteAttachment) -> ServiceResult<(MediaKind, Vec<u8>)> {
        let content_type = attachment.content_type.clone().unwrap_or_default();
        let kind = MediaKind::from_content_type(&content_type)
            .ok_or(DomainError::UnsupportedMedia(content_type))?;

        let settings = self.ctx.settings();
        if attachment.size > settings.max_media_bytes {
            return Err(DomainError::MediaTooLarge {
                max_mb: settings.max_media_mb(),
            }
            .into());
        }

        let data = self
            .ctx
            .platform()
            .download(&attachment.url, settings.max_media_bytes)
            .await?;
        debug!(kind = %kind, bytes = data.len(), "Media downloaded");
        Ok((kind, data))
    }

    /// Details form for a draft. Anyone in the guild may open it.
    #[instrument(skip(self, identity))]
    pub async fn details_form(&self, identity: &Identity, bug_id: i64) -> ServiceResult<ModalForm> {
        let (bug, _) = self.load(identity, bug_id).await?;
        Ok(render::details_form(&bug))
    }

    // ========================================================================
    // Publish
    // ========================================================================

    /// Publish a draft to the guild's bug channel
    ///
    /// Sends the bug message, records it, then opens a discussion thread and
    /// adds the publisher to it. If recording fails the message is removed
    /// again; thread failures are logged and leave the bug published.
    #[instrument(skip(self, identity, actor, form), fields(actor = %actor.user_id))]
    pub async fn publish(
        &self,
        identity: &Identity,
        actor: &Actor,
        bug_id: i64,
        form: BugForm,
    ) -> ServiceResult<Published> {
        let (draft, _) = self.load(identity, bug_id).await?;
        draft.ensure_draft()?;
        form.check()?;

        let guild_id = identity.guild.guild_id;
        let guild = self
            .ctx
            .guild_repo()
            .find_by_guild_id(guild_id)
            .await?
            .ok_or(DomainError::GuildNotFound(guild_id))?;
        let channel_id = guild
            .channel(GuildChannel::Bugs)
            .ok_or(DomainError::ChannelNotConfigured(GuildChannel::Bugs.label()))?;

        let media = self.ctx.media_repo().find_by_bug(draft.id).await?;

        let mut preview = draft.clone();
        preview.title.clone_from(&form.title);
        preview.description.clone_from(&form.description);
        let outgoing = render::bug_message(&preview, render::actor_author(actor), media.as_ref());
        let message = self.ctx.platform().send_message(channel_id, outgoing).await?;

        let bug = match self
            .ctx
            .bug_repo()
            .publish(draft.id, &form.title, &form.description, message.id)
            .await
        {
            Ok(bug) => bug,
            Err(err) => {
                if let Err(cleanup) = self.ctx.platform().delete_message(channel_id, message.id).await {
                    warn!(message_id = %message.id, error = %cleanup, "Failed to remove unrecorded bug message");
                }
                return Err(err.into());
            }
        };

        let thread_url = self
            .open_thread(&bug, guild_id, channel_id, message.id, actor.user_id)
            .await;

        info!(bug_id = bug.id, message_id = %message.id, "Bug published");
        Ok(Published {
            message_url: message_url(guild_id, channel_id, message.id),
            thread_url,
            bug,
        })
    }

    async fn open_thread(
        &self,
        bug: &Bug,
        guild_id: Snowflake,
        channel_id: Snowflake,
        message_id: Snowflake,
        reporter: Snowflake,
    ) -> Option<String> {
        let platform = self.ctx.platform();
        let thread_id = match platform
            .start_thread(
                channel_id,
                message_id,
                &render::thread_name(bug),
                render::THREAD_AUTO_ARCHIVE_MINUTES,
            )
            .await
        {
            Ok(thread_id) => thread_id,
            Err(e) => {
                warn!(bug_id = bug.id, error = %e, "Failed to start bug thread");
                return None;
            }
        };

        let intro = OutgoingMessage::text(render::thread_intro(bug, reporter));
        if let Err(e) = platform.send_message(thread_id, intro).await {
            warn!(bug_id = bug.id, error = %e, "Failed to seed bug thread");
        }
        if let Err(e) = platform.add_thread_member(thread_id, reporter).await {
            warn!(bug_id = bug.id, error = %e, "Failed to add reporter to bug thread");
        }
        Some(channel_url(guild_id, thread_id))
    }

    // ========================================================================
    // Controls
    // ========================================================================

    /// Resolve the bug behind a control, adopting legacy embed-only reports
    ///
    /// An unknown id falls back to the bug stored for the pressed message.
    /// Adoption only happens when neither is known and the message carries
    /// an embed with author, title and description.
    #[instrument(skip(self, identity, actor, message), fields(message_id = %message.id))]
    pub async fn resolve_for_component(
        &self,
        identity: &Identity,
        actor: &Actor,
        bug_id: i64,
        message: &RemoteMessage,
    ) -> ServiceResult<Resolved> {
        match self.load(identity, bug_id).await {
            Ok((bug, _)) => Ok(Resolved::Existing(bug)),
            Err(ServiceError::Domain(DomainError::BugNotFound(_))) => {
                // Controls left over from before an adoption still carry the old id
                if let Some(stored) = self.ctx.bug_repo().find_by_message_id(message.id).await? {
                    let (bug, _) = self.load(identity, stored.id).await?;
                    return Ok(Resolved::Existing(bug));
                }
                if !message.embeds.first().is_some_and(|e| e.is_bug_shaped()) {
                    return Err(DomainError::BugNotFound(bug_id).into());
                }
                self.adopt_legacy(identity, actor, message)
                    .await
                    .map(Resolved::Adopted)
            }
            Err(e) => Err(e),
        }
    }

    /// Adopt a legacy report message as a sent, open bug
    ///
    /// The owner is the guild member named as the embed author. When nobody
    /// matches, only a manager may adopt the report, and it is owned by the
    /// account that posted the message.
    #[instrument(skip(self, identity, actor, message), fields(message_id = %message.id))]
    pub async fn adopt_legacy(
        &self,
        identity: &Identity,
        actor: &Actor,
        message: &RemoteMessage,
    ) -> ServiceResult<Bug> {
        let embed = message
            .embeds
            .first()
            .filter(|e| e.is_bug_shaped())
            .ok_or(DomainError::BugMessageNotFound(message.id))?;
        let author_name = embed.author.as_ref().map_or("", |a| a.name.as_str());
        let guild_id = identity.guild.guild_id;

        let owner_id = match self.legacy_author(guild_id, author_name).await {
            Some(user_id) => user_id,
            None => {
                self.permissions()
                    .require_manager(actor, guild_id, "adopt this bug")
                    .await?;
                message.author_id
            }
        };
        let owner = IdentityService::new(self.ctx)
            .ensure_user(owner_id, guild_id)
            .await?;

        let title = embed.title.clone().unwrap_or_default();
        let description: String = embed
            .description
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(MAX_DESCRIPTION_LEN)
            .collect();

        let bug = self
            .ctx
            .bug_repo()
            .create_published(owner.id, &title, &description, message.id, BugStatus::Open)
            .await?;

        let mut rendered = render::bug_embed(&bug, embed.author.clone().unwrap_or_default(), None);
        rendered.image_url.clone_from(&embed.image_url);
        let edit = MessageEdit {
            embeds: Some(vec![rendered]),
            components: Some(vec![render::controls(&bug)]),
            ..MessageEdit::default()
        };
        if let Err(e) = self
            .ctx
            .platform()
            .edit_message(message.channel_id, message.id, edit)
            .await
        {
            warn!(bug_id = bug.id, error = %e, "Failed to re-render adopted bug message");
        }

        info!(bug_id = bug.id, "Legacy bug adopted");
        Ok(bug)
    }

    /// Member named by a legacy embed author, if one can be found
    async fn legacy_author(&self, guild_id: Snowflake, name: &str) -> Option<Snowflake> {
        if name.is_empty() {
            return None;
        }
        match self.ctx.platform().find_member(guild_id, name).await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "Failed to look up legacy bug author");
                None
            }
        }
    }

    /// Close or reopen a published bug
    ///
    /// `channel_id` is the channel holding the bug message.
    #[instrument(skip(self, identity, actor), fields(actor = %actor.user_id))]
    pub async fn set_status(
        &self,
        identity: &Identity,
        actor: &Actor,
        bug_id: i64,
        status: BugStatus,
        channel_id: Snowflake,
    ) -> ServiceResult<Bug> {
        let (mut bug, _) = self.load(identity, bug_id).await?;
        let action = match status {
            BugStatus::Open => "reopen this bug",
            BugStatus::Closed => "close this bug",
        };
        self.permissions()
            .require_modify_bug(actor, identity, &bug, action)
            .await?;
        bug.transition(status)?;

        self.ctx.bug_repo().set_status(bug.id, status).await?;
        info!(bug_id = bug.id, status = %status, "Bug status changed");

        self.sync_status(&bug, channel_id, actor.user_id).await;
        Ok(bug)
    }

    async fn sync_status(&self, bug: &Bug, channel_id: Snowflake, actor: Snowflake) {
        let Some(message) = self.fetch_bug_message(bug, channel_id).await else {
            return;
        };
        let platform = self.ctx.platform();

        let edit = MessageEdit {
            components: Some(vec![render::controls(bug)]),
            ..MessageEdit::default()
        };
        if let Err(e) = platform.edit_message(channel_id, message.id, edit).await {
            warn!(bug_id = bug.id, error = %e, "Failed to update bug controls");
        }

        if let Some(thread_id) = message.thread_id {
            let notice = OutgoingMessage::text(render::status_notice(bug.id, bug.status, actor));
            if let Err(e) = platform.send_message(thread_id, notice).await {
                warn!(bug_id = bug.id, error = %e, "Failed to post status notice");
            }
        }
    }

    /// Read back the message mirroring a bug, or `None` if it is unreachable
    async fn fetch_bug_message(&self, bug: &Bug, channel_id: Snowflake) -> Option<RemoteMessage> {
        let message_id = bug.message_id?;
        match self.ctx.platform().fetch_message(channel_id, message_id).await {
            Ok(message) => Some(message),
            Err(e) => {
                warn!(bug_id = bug.id, message_id = %message_id, error = %e, "Bug message unavailable, skipping sync");
                None
            }
        }
    }

    // ========================================================================
    // Edit
    // ========================================================================

    /// Edit form for a published bug
    #[instrument(skip(self, identity, actor), fields(actor = %actor.user_id))]
    pub async fn edit_form(
        &self,
        identity: &Identity,
        actor: &Actor,
        bug_id: i64,
    ) -> ServiceResult<ModalForm> {
        let (bug, _) = self.load(identity, bug_id).await?;
        self.permissions()
            .require_modify_bug(actor, identity, &bug, "edit this bug")
            .await?;
        Ok(render::edit_form(&bug))
    }

    /// Replace the title and description of a published bug
    #[instrument(skip(self, identity, actor, form), fields(actor = %actor.user_id))]
    pub async fn edit(
        &self,
        identity: &Identity,
        actor: &Actor,
        bug_id: i64,
        form: BugForm,
        channel_id: Snowflake,
    ) -> ServiceResult<Bug> {
        let (mut bug, _) = self.load(identity, bug_id).await?;
        if !bug.sent {
            return Err(ServiceError::conflict("You can only edit sent bugs."));
        }
        self.permissions()
            .require_modify_bug(actor, identity, &bug, "edit this bug")
            .await?;
        form.check()?;

        self.ctx
            .bug_repo()
            .update_title_description(bug.id, &form.title, &form.description)
            .await?;
        bug.title = form.title;
        bug.description = form.description;
        info!(bug_id = bug.id, "Bug edited");

        self.sync_embed(&bug, channel_id).await;
        Ok(bug)
    }

    /// Rewrite title and description on the first embed, keeping the rest
    async fn sync_embed(&self, bug: &Bug, channel_id: Snowflake) {
        let Some(message) = self.fetch_bug_message(bug, channel_id).await else {
            return;
        };

        let mut embeds = message.embeds;
        if embeds.is_empty() {
            embeds.push(Embed::default());
        }
        embeds[0].title = Some(bug.title.clone());
        embeds[0].description = Some(bug.description.clone());

        let edit = MessageEdit {
            embeds: Some(embeds),
            ..MessageEdit::default()
        };
        if let Err(e) = self.ctx.platform().edit_message(channel_id, message.id, edit).await {
            warn!(bug_id = bug.id, error = %e, "Failed to update bug embed");
        }
    }

    // ========================================================================
    // Delete
    // ========================================================================

    /// Delete a published bug
    ///
    /// The record is tombstoned first. Then the thread gets a notice and is
    /// locked, and the bug message is removed.
    #[instrument(skip(self, identity, actor), fields(actor = %actor.user_id))]
    pub async fn delete(
        &self,
        identity: &Identity,
        actor: &Actor,
        bug_id: i64,
        channel_id: Snowflake,
    ) -> ServiceResult<Bug> {
        let (bug, _) = self.load(identity, bug_id).await?;
        self.permissions()
            .require_modify_bug(actor, identity, &bug, "delete this bug")
            .await?;
        bug.ensure_sent()?;

        self.ctx.bug_repo().delete(bug.id).await?;
        info!(bug_id = bug.id, "Bug deleted");

        self.sync_delete(&bug, channel_id, actor.user_id).await;
        Ok(bug)
    }

    async fn sync_delete(&self, bug: &Bug, channel_id: Snowflake, actor: Snowflake) {
        let Some(message) = self.fetch_bug_message(bug, channel_id).await else {
            return;
        };
        let platform = self.ctx.platform();

        if let Some(thread_id) = message.thread_id {
            let notice = OutgoingMessage::text(render::delete_notice(bug.id, actor));
            if let Err(e) = platform.send_message(thread_id, notice).await {
                warn!(bug_id = bug.id, error = %e, "Failed to post deletion notice");
            }
            if let Err(e) = platform.lock_thread(thread_id).await {
                warn!(bug_id = bug.id, error = %e, "Failed to lock bug thread");
            }
        }

        if let Err(e) = platform.delete_message(channel_id, message.id).await {
            warn!(bug_id = bug.id, error = %e, "Failed to delete bug message");
        }
    }

    // ========================================================================
    // References
    // ========================================================================

    /// Resolve a `bug#<id>` mention to a link, if the bug is published here
    ///
    /// Returns `None` when the guild has no bug channel, the bug is unknown,
    /// unpublished or from another guild, or its message is gone.
    #[instrument(skip(self))]
    pub async fn lookup_reference(
        &self,
        guild_id: Snowflake,
        bug_id: i64,
    ) -> ServiceResult<Option<BugReference>> {
        let Some(guild) = self.ctx.guild_repo().find_by_guild_id(guild_id).await? else {
            return Ok(None);
        };
        let Some(channel_id) = guild.channel(GuildChannel::Bugs) else {
            return Ok(None);
        };
        let Some(bug) = self.ctx.bug_repo().find_by_id(bug_id).await? else {
            return Ok(None);
        };
        let Some(message_id) = bug.message_id else {
            return Ok(None);
        };
        let Some(reporter) = self
            .ctx
            .user_repo()
            .find_by_id(bug.user_id)
            .await?
            .filter(|user| user.guild_id == guild_id)
        else {
            return Ok(None);
        };

        let message = match self.ctx.platform().fetch_message(channel_id, message_id).await {
            Ok(message) => message,
            Err(e) => {
                debug!(bug_id, error = %e, "Referenced bug message unavailable");
                return Ok(None);
            }
        };

        Ok(Some(BugReference {
            bug_id: bug.id,
            title: bug.title,
            reporter: reporter.user_id,
            url: message
                .url()
                .unwrap_or_else(|| message_url(guild_id, channel_id, message_id)),
        }))
    }
}
