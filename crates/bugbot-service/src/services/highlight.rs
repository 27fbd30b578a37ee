//! Highlight service
//!
//! Reposts clips from a message to the guild's highlights channel.

use bugbot_core::entities::GuildChannel;
use bugbot_core::{
    message_url, Actor, ChannelKind, DomainError, FileUpload, OutgoingMessage, RemoteAttachment,
    RemoteMessage,
};
use futures::future::join_all;
use tracing::{info, instrument, warn};

use crate::dto::Highlight;
use crate::render;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::identity::Identity;
use super::permission::PermissionService;

/// Video hosts whose link embeds count as clips
pub const CLIP_DOMAINS: &[&str] = &["medal.tv", "youtube.com", "youtu.be", "twitch.tv"];

/// Links of supported video embeds on a message
pub fn clip_urls(message: &RemoteMessage) -> Vec<String> {
    message
        .embeds
        .iter()
        .filter(|embed| {
            embed.provider.as_ref().is_some_and(|provider| {
                CLIP_DOMAINS
                    .iter()
                    .any(|domain| provider.matches_domain(domain))
            })
        })
        .filter_map(|embed| embed.url.clone())
        .collect()
}

/// Highlight service
pub struct HighlightService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HighlightService<'a> {
    /// Create a new HighlightService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a message's clips and attachments to the highlights channel
    #[instrument(skip(self, identity, actor, target), fields(actor = %actor.user_id, target = %target.id))]
    pub async fn highlight(
        &self,
        identity: &Identity,
        actor: &Actor,
        target: &RemoteMessage,
    ) -> ServiceResult<Highlight> {
        let guild_id = identity.guild.guild_id;
        PermissionService::new(self.ctx)
            .require_manager(actor, guild_id, "highlight clips")
            .await?;

        let guild = self
            .ctx
            .guild_repo()
            .find_by_guild_id(guild_id)
            .await?
            .ok_or(DomainError::GuildNotFound(guild_id))?;
        let channel_id = guild
            .channel(GuildChannel::Highlights)
            .ok_or(DomainError::ChannelNotConfigured(GuildChannel::Highlights.label()))?;
        if self.ctx.platform().channel_kind(channel_id).await? != ChannelKind::Text {
            return Err(ServiceError::validation(
                "The highlight channel set up for this server is invalid.",
            ));
        }

        let clips = clip_urls(target);
        if clips.is_empty() && target.attachments.is_empty() {
            return Err(ServiceError::validation("There's nothing to highlight."));
        }

        let files = self.download_all(&target.attachments).await;
        if !target.attachments.is_empty() && files.is_empty() {
            return Err(ServiceError::validation("Failed to download any attachments."));
        }
        let uploaded = files.len();
        let skipped = target.attachments.len() - uploaded;

        let jump_url = target
            .url()
            .unwrap_or_else(|| message_url(guild_id, target.channel_id, target.id));
        let mut outgoing =
            OutgoingMessage::text(render::highlight_content(target.author_id, &jump_url, &clips));
        outgoing.files = files;

        let posted = self.ctx.platform().send_message(channel_id, outgoing).await?;
        if let Err(e) = self
            .ctx
            .platform()
            .react(channel_id, posted.id, render::HIGHLIGHT_REACTION)
            .await
        {
            warn!(message_id = %posted.id, error = %e, "Failed to react to highlight");
        }

        info!(message_id = %posted.id, uploaded, skipped, "Highlight posted");
        Ok(Highlight {
            url: posted
                .url()
                .unwrap_or_else(|| message_url(guild_id, channel_id, posted.id)),
            uploaded,
            skipped,
        })
    }

    /// Download attachments concurrently, skipping oversized or failed ones
    async fn download_all(&self, attachments: &[RemoteAttachment]) -> Vec<FileUpload> {
        let max_bytes = self.ctx.settings().max_media_bytes;
        let downloads = attachments.iter().map(|attachment| async move {
            if attachment.size > max_bytes {
                warn!(file = %attachment.filename, size = attachment.size, "Skipping oversized attachment");
                return None;
            }
            match self.ctx.platform().download(&attachment.url, max_bytes).await {
                Ok(data) => Some(FileUpload {
                    name: attachment.filename.clone(),
                    data,
                }),
                Err(e) => {
                    warn!(file = %attachment.filename, error = %e, "Failed to download attachment");
                    None
                }
            }
        });
        join_all(downloads).await.into_iter().flatten().collect()
    }
}
