//! Chat platform port
//!
//! The narrow set of remote operations the bot performs against the chat
//! platform, plus the message shapes it builds and reads. The serenity
//! adapter in `bugbot-bot` implements [`ChatPlatform`]; tests use a
//! recording fake.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::value_objects::Snowflake;

/// Base URL for message jump links
pub const MESSAGE_LINK_BASE: &str = "https://discord.com/channels";

/// Errors returned by the chat platform
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The message, channel or thread no longer exists
    #[error("remote resource not found")]
    NotFound,

    /// The bot lost access to the resource
    #[error("missing access to remote resource")]
    Forbidden,

    #[error("platform request failed: {0}")]
    Http(String),
}

impl PlatformError {
    /// The remote resource is gone or unreachable for the bot
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::NotFound | Self::Forbidden)
    }
}

/// Result type for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Jump link to a message
pub fn message_url(guild_id: Snowflake, channel_id: Snowflake, message_id: Snowflake) -> String {
    format!("{MESSAGE_LINK_BASE}/{guild_id}/{channel_id}/{message_id}")
}

/// Jump link to a channel or thread
pub fn channel_url(guild_id: Snowflake, channel_id: Snowflake) -> String {
    format!("{MESSAGE_LINK_BASE}/{guild_id}/{channel_id}")
}

// ============================================================================
// Message shapes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmbedAuthor {
    pub name: String,
    pub icon_url: Option<String>,
}

/// Site that produced a link embed, e.g. a video host
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmbedProvider {
    pub name: Option<String>,
    pub url: Option<String>,
}

impl EmbedProvider {
    /// Check the provider name or url against a domain
    pub fn matches_domain(&self, domain: &str) -> bool {
        let hit = |value: &Option<String>| {
            value
                .as_deref()
                .is_some_and(|v| v.to_ascii_lowercase().contains(domain))
        };
        hit(&self.name) || hit(&self.url)
    }
}

/// Rich embed. Fields the bot does not set are carried through edits untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Embed {
    pub author: Option<EmbedAuthor>,
    pub provider: Option<EmbedProvider>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub footer: Option<String>,
    pub image_url: Option<String>,
    pub color: Option<u32>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Embed {
    /// An embed has enough content to describe a bug report
    pub fn is_bug_shaped(&self) -> bool {
        self.author.is_some()
            && self.title.as_deref().is_some_and(|t| !t.is_empty())
            && self.description.as_deref().is_some_and(|d| !d.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

/// Interactive button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub custom_id: String,
    pub label: String,
    pub style: ButtonStyle,
}

impl Button {
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>, style: ButtonStyle) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            style,
        }
    }
}

/// One row of buttons
pub type ActionRow = Vec<Button>;

/// Layout of a modal text input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextInputStyle {
    /// Single line
    Short,
    /// Multi-line
    Paragraph,
}

/// Text input inside a modal form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub custom_id: String,
    pub label: String,
    pub style: TextInputStyle,
    pub placeholder: Option<String>,
    /// Prefilled value
    pub value: Option<String>,
    pub max_length: Option<u16>,
    pub required: bool,
}

impl TextInput {
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>, style: TextInputStyle) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            style,
            placeholder: None,
            value: None,
            max_length: None,
            required: true,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Prefill the input. Empty values are left unset.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.value = (!value.is_empty()).then_some(value);
        self
    }

    pub fn max_length(mut self, max_length: u16) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

/// A modal form shown in response to a button or command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalForm {
    pub custom_id: String,
    pub title: String,
    /// One input per row
    pub inputs: Vec<TextInput>,
}

/// A file to upload with a message
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("name", &self.name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// A message to send
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutgoingMessage {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    pub components: Vec<ActionRow>,
    pub files: Vec<FileUpload>,
    /// Render mentions as plain text without pinging anyone
    pub suppress_mentions: bool,
    pub reply_to: Option<Snowflake>,
}

impl OutgoingMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn row(mut self, row: ActionRow) -> Self {
        self.components.push(row);
        self
    }

    pub fn file(mut self, file: FileUpload) -> Self {
        self.files.push(file);
        self
    }

    pub fn without_mentions(mut self) -> Self {
        self.suppress_mentions = true;
        self
    }

    pub fn reply_to(mut self, message_id: Snowflake) -> Self {
        self.reply_to = Some(message_id);
        self
    }
}

/// Partial edit of an existing message. `None` leaves the part unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageEdit {
    pub content: Option<String>,
    pub embeds: Option<Vec<Embed>>,
    pub components: Option<Vec<ActionRow>>,
}

/// Attachment on a remote message or command option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAttachment {
    pub url: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub size: u64,
}

/// A message as read back from the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMessage {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub guild_id: Option<Snowflake>,
    pub author_id: Snowflake,
    pub content: String,
    pub embeds: Vec<Embed>,
    pub attachments: Vec<RemoteAttachment>,
    /// Thread started from this message, if any
    pub thread_id: Option<Snowflake>,
}

impl RemoteMessage {
    /// Jump link, if the message lives in a guild
    pub fn url(&self) -> Option<String> {
        self.guild_id
            .map(|guild| message_url(guild, self.channel_id, self.id))
    }
}

/// Kind of a guild channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Text,
    Forum,
    Thread,
    Voice,
    Other,
}

impl ChannelKind {
    /// Text or forum channel
    pub fn accepts_posts(self) -> bool {
        matches!(self, Self::Text | Self::Forum)
    }
}

// ============================================================================
// Port
// ============================================================================

#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Post a message to a channel or thread
    async fn send_message(
        &self,
        channel_id: Snowflake,
        message: OutgoingMessage,
    ) -> PlatformResult<RemoteMessage>;

    /// Read a message back
    async fn fetch_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> PlatformResult<RemoteMessage>;

    /// Edit parts of a message
    async fn edit_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        edit: MessageEdit,
    ) -> PlatformResult<()>;

    async fn delete_message(&self, channel_id: Snowflake, message_id: Snowflake)
        -> PlatformResult<()>;

    /// Start a public thread from a message and return its id
    async fn start_thread(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        name: &str,
        auto_archive_minutes: u16,
    ) -> PlatformResult<Snowflake>;

    async fn add_thread_member(&self, thread_id: Snowflake, user_id: Snowflake)
        -> PlatformResult<()>;

    /// Lock a thread so only moderators can post
    async fn lock_thread(&self, thread_id: Snowflake) -> PlatformResult<()>;

    /// React to a message with a unicode emoji
    async fn react(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> PlatformResult<()>;

    /// Download attachment bytes, refusing anything above `max_bytes`
    async fn download(&self, url: &str, max_bytes: u64) -> PlatformResult<Vec<u8>>;

    /// Look up the kind of a channel
    async fn channel_kind(&self, channel_id: Snowflake) -> PlatformResult<ChannelKind>;

    /// Find a guild member whose username or display name is exactly `name`
    async fn find_member(&self, guild_id: Snowflake, name: &str)
        -> PlatformResult<Option<Snowflake>>;
}
