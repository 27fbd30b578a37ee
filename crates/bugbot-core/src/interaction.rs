//! Normalized inbound interactions
//!
//! The platform adapter converts every gateway interaction into an
//! [`Interaction`] whose [`InteractionKind`] carries only the fields relevant
//! to that kind.

use std::collections::HashMap;

use crate::platform::{RemoteAttachment, RemoteMessage};
use crate::value_objects::{CustomId, Permissions, Snowflake};

/// The member who triggered an interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Snowflake,
    /// Display name shown on embeds
    pub name: String,
    pub avatar_url: Option<String>,
    /// Roles held in the guild at the time of the interaction
    pub role_ids: Vec<Snowflake>,
    /// Effective guild permissions
    pub permissions: Permissions,
}

impl Actor {
    pub fn mention(&self) -> String {
        self.user_id.user_mention()
    }
}

/// An inbound interaction
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub id: Snowflake,
    /// `None` for interactions outside a guild
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    pub actor: Actor,
    pub kind: InteractionKind,
}

/// Value of a slash command option
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    User(Snowflake),
    Channel(Snowflake),
    Role(Snowflake),
    Attachment(RemoteAttachment),
}

/// Flattened option of a slash command
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOption {
    pub name: String,
    pub value: OptionValue,
}

/// A slash command invocation with its subcommand path flattened
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlashCommand {
    pub name: String,
    pub subcommand_group: Option<String>,
    pub subcommand: Option<String>,
    pub options: Vec<CommandOption>,
}

impl SlashCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options
            .iter()
            .find(|opt| opt.name == name)
            .map(|opt| &opt.value)
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.option(name) {
            Some(OptionValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.option(name) {
            Some(OptionValue::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn channel(&self, name: &str) -> Option<Snowflake> {
        match self.option(name) {
            Some(OptionValue::Channel(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn role(&self, name: &str) -> Option<Snowflake> {
        match self.option(name) {
            Some(OptionValue::Role(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn attachment(&self, name: &str) -> Option<&RemoteAttachment> {
        match self.option(name) {
            Some(OptionValue::Attachment(a)) => Some(a),
            _ => None,
        }
    }
}

/// Autocomplete request for a command option being typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteRequest {
    pub command: String,
    pub focused_option: String,
    pub value: String,
}

/// Button press on a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentPress {
    pub custom_id: String,
    /// The message carrying the button
    pub message: RemoteMessage,
}

/// Submitted modal form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSubmission {
    pub custom_id: String,
    pub fields: HashMap<String, String>,
}

impl ModalSubmission {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Target of a context menu command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextTarget {
    Message(Box<RemoteMessage>),
    User(Snowflake),
}

/// Context menu command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenuInvocation {
    pub name: String,
    pub target: ContextTarget,
}

/// Interaction payload, by kind
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionKind {
    Command(SlashCommand),
    Autocomplete(AutocompleteRequest),
    Button(ComponentPress),
    Modal(ModalSubmission),
    ContextMenu(ContextMenuInvocation),
    /// Any other interaction type, e.g. select menus
    Unsupported {
        kind: String,
        /// Whether the interaction accepts a response
        repliable: bool,
    },
}

impl InteractionKind {
    /// Short label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Command(_) => "command",
            Self::Autocomplete(_) => "autocomplete",
            Self::Button(_) => "button",
            Self::Modal(_) => "modal",
            Self::ContextMenu(_) => "context_menu",
            Self::Unsupported { .. } => "unsupported",
        }
    }

    /// Routing key: the command name, or the custom id family for components
    pub fn discriminator(&self) -> Option<&str> {
        match self {
            Self::Command(cmd) => Some(cmd.name.as_str()),
            Self::Autocomplete(req) => Some(req.command.as_str()),
            Self::Button(press) => Some(CustomId::parse(&press.custom_id).discriminator()),
            Self::Modal(modal) => Some(CustomId::parse(&modal.custom_id).discriminator()),
            Self::ContextMenu(menu) => Some(menu.name.as_str()),
            Self::Unsupported { .. } => None,
        }
    }
}
