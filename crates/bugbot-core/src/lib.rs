//! # bugbot-core
//!
//! Domain layer containing entities, value objects, repository traits, the
//! chat-platform port and the normalized interaction model.
//! This crate has zero dependencies on infrastructure (database, platform client, etc.).

pub mod entities;
pub mod error;
pub mod interaction;
pub mod platform;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Bug, BugStatus, Guild, GuildChannel, Media, MediaKind, User, MAX_DESCRIPTION_LEN,
    MAX_TITLE_LEN, MIN_TITLE_LEN,
};
pub use error::DomainError;
pub use interaction::{
    Actor, AutocompleteRequest, CommandOption, ComponentPress, ContextMenuInvocation,
    ContextTarget, Interaction, InteractionKind, ModalSubmission, OptionValue, SlashCommand,
};
pub use platform::{
    channel_url, message_url, ActionRow, Button, ButtonStyle, ChannelKind, ChatPlatform, Embed,
    EmbedAuthor, EmbedProvider, FileUpload, MessageEdit, ModalForm, OutgoingMessage,
    PlatformError, PlatformResult, RemoteAttachment, RemoteMessage, TextInput, TextInputStyle,
};
pub use traits::{BugRepository, GuildRepository, MediaRepository, RepoResult, UserRepository};
pub use value_objects::{
    bug_custom_id, family, parse_bug_id, CustomId, Permissions, Snowflake, SnowflakeParseError,
};
