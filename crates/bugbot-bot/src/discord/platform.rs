//! [`ChatPlatform`] implementation over the serenity HTTP client

use std::sync::Arc;

use async_trait::async_trait;
use bugbot_core::{
    ChannelKind, ChatPlatform, MessageEdit, OutgoingMessage, PlatformError, PlatformResult,
    RemoteMessage, Snowflake,
};
use serenity::builder::{CreateAttachment, CreateMessage, CreateThread, EditMessage, EditThread};
use serenity::http::Http;
use serenity::model::channel::{AutoArchiveDuration, Channel, ChannelType, ReactionType};
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};
use tracing::{debug, instrument};

use super::convert::{self, create_embed, create_rows, no_mentions, platform_error, to_id};

/// Members returned by one name search; prefix matches beyond this are ignored
const MEMBER_SEARCH_LIMIT: u64 = 25;

/// Chat platform backed by the REST API
pub struct SerenityPlatform {
    http: Arc<Http>,
    downloads: reqwest::Client,
}

impl SerenityPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self {
            http,
            downloads: reqwest::Client::new(),
        }
    }
}

impl std::fmt::Debug for SerenityPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerenityPlatform").finish_non_exhaustive()
    }
}

fn archive_duration(minutes: u16) -> AutoArchiveDuration {
    match minutes {
        0..=60 => AutoArchiveDuration::OneHour,
        61..=1440 => AutoArchiveDuration::OneDay,
        1441..=4320 => AutoArchiveDuration::ThreeDays,
        _ => AutoArchiveDuration::OneWeek,
    }
}

fn channel_kind(kind: ChannelType) -> ChannelKind {
    match kind {
        ChannelType::Text | ChannelType::News => ChannelKind::Text,
        ChannelType::Forum => ChannelKind::Forum,
        ChannelType::PublicThread | ChannelType::PrivateThread | ChannelType::NewsThread => {
            ChannelKind::Thread
        }
        ChannelType::Voice | ChannelType::Stage => ChannelKind::Voice,
        _ => ChannelKind::Other,
    }
}

fn download_error(err: reqwest::Error) -> PlatformError {
    if err.status().is_some_and(|status| status.as_u16() == 404) {
        return PlatformError::NotFound;
    }
    PlatformError::Http(err.to_string())
}

fn too_large(max_bytes: u64) -> PlatformError {
    PlatformError::Http(format!("attachment exceeds {max_bytes} bytes"))
}

#[async_trait]
impl ChatPlatform for SerenityPlatform {
    #[instrument(skip(self, message))]
    async fn send_message(
        &self,
        channel_id: Snowflake,
        message: OutgoingMessage,
    ) -> PlatformResult<RemoteMessage> {
        let channel: ChannelId = to_id(channel_id)?;

        let mut builder = CreateMessage::new()
            .embeds(message.embeds.iter().map(create_embed).collect())
            .components(create_rows(&message.components));
        if let Some(content) = message.content {
            builder = builder.content(content);
        }
        for file in message.files {
            builder = builder.add_file(CreateAttachment::bytes(file.data, file.name));
        }
        if message.suppress_mentions {
            builder = builder.allowed_mentions(no_mentions());
        }
        if let Some(reply_to) = message.reply_to {
            let reply_to: MessageId = to_id(reply_to)?;
            builder = builder.reference_message((channel, reply_to));
        }

        let sent = channel
            .send_message(&self.http, builder)
            .await
            .map_err(platform_error)?;
        debug!(message_id = %sent.id, "Message sent");
        Ok(convert::message(&sent))
    }

    #[instrument(skip(self))]
    async fn fetch_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> PlatformResult<RemoteMessage> {
        let channel: ChannelId = to_id(channel_id)?;
        let message_id: MessageId = to_id(message_id)?;
        let message = channel
            .message(&self.http, message_id)
            .await
            .map_err(platform_error)?;
        Ok(convert::message(&message))
    }

    #[instrument(skip(self, edit))]
    async fn edit_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        edit: MessageEdit,
    ) -> PlatformResult<()> {
        let channel: ChannelId = to_id(channel_id)?;
        let message_id: MessageId = to_id(message_id)?;

        let mut builder = EditMessage::new();
        if let Some(content) = edit.content {
            builder = builder.content(content);
        }
        if let Some(embeds) = edit.embeds {
            builder = builder.embeds(embeds.iter().map(create_embed).collect());
        }
        if let Some(components) = edit.components {
            builder = builder.components(create_rows(&components));
        }

        channel
            .edit_message(&self.http, message_id, builder)
            .await
            .map_err(platform_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> PlatformResult<()> {
        let channel: ChannelId = to_id(channel_id)?;
        let message_id: MessageId = to_id(message_id)?;
        channel
            .delete_message(&self.http, message_id)
            .await
            .map_err(platform_error)
    }

    #[instrument(skip(self))]
    async fn start_thread(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        name: &str,
        auto_archive_minutes: u16,
    ) -> PlatformResult<Snowflake> {
        let channel: ChannelId = to_id(channel_id)?;
        let message_id: MessageId = to_id(message_id)?;
        let builder =
            CreateThread::new(name).auto_archive_duration(archive_duration(auto_archive_minutes));
        let thread = channel
            .create_thread_from_message(&self.http, message_id, builder)
            .await
            .map_err(platform_error)?;
        Ok(convert::snowflake(thread.id))
    }

    #[instrument(skip(self))]
    async fn add_thread_member(
        &self,
        thread_id: Snowflake,
        user_id: Snowflake,
    ) -> PlatformResult<()> {
        let thread: ChannelId = to_id(thread_id)?;
        let user: UserId = to_id(user_id)?;
        thread
            .add_thread_member(&self.http, user)
            .await
            .map_err(platform_error)
    }

    #[instrument(skip(self))]
    async fn lock_thread(&self, thread_id: Snowflake) -> PlatformResult<()> {
        let thread: ChannelId = to_id(thread_id)?;
        thread
            .edit_thread(&self.http, EditThread::new().locked(true))
            .await
            .map_err(platform_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn react(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> PlatformResult<()> {
        let channel: ChannelId = to_id(channel_id)?;
        let message_id: MessageId = to_id(message_id)?;
        channel
            .create_reaction(&self.http, message_id, ReactionType::Unicode(emoji.to_string()))
            .await
            .map_err(platform_error)
    }

    #[instrument(skip(self))]
    async fn download(&self, url: &str, max_bytes: u64) -> PlatformResult<Vec<u8>> {
        let response = self
            .downloads
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(download_error)?;

        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(too_large(max_bytes));
        }
        let bytes = response.bytes().await.map_err(download_error)?;
        if bytes.len() as u64 > max_bytes {
            return Err(too_large(max_bytes));
        }
        debug!(bytes = bytes.len(), "Attachment downloaded");
        Ok(bytes.to_vec())
    }

    #[instrument(skip(self))]
    async fn channel_kind(&self, channel_id: Snowflake) -> PlatformResult<ChannelKind> {
        let channel: ChannelId = to_id(channel_id)?;
        let resolved = channel
            .to_channel(&self.http)
            .await
            .map_err(platform_error)?;
        Ok(match resolved {
            Channel::Guild(guild_channel) => channel_kind(guild_channel.kind),
            _ => ChannelKind::Other,
        })
    }

    #[instrument(skip(self))]
    async fn find_member(
        &self,
        guild_id: Snowflake,
        name: &str,
    ) -> PlatformResult<Option<Snowflake>> {
        let guild: GuildId = to_id(guild_id)?;
        let candidates = guild
            .search_members(&self.http, name, Some(MEMBER_SEARCH_LIMIT))
            .await
            .map_err(platform_error)?;
        Ok(candidates
            .iter()
            .find(|member| member.user.name == name || member.display_name() == name)
            .map(|member| convert::snowflake(member.user.id)))
    }
}
