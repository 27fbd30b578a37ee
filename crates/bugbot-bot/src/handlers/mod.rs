//! Interaction handlers
//!
//! Three handler families, one per routable interaction namespace: commands
//! (slash and context menu, keyed by command name), buttons and modals (keyed
//! by the custom id family before the first `-`).

mod buttons;
mod commands;
mod modals;

use async_trait::async_trait;
use bugbot_core::{
    Actor, AutocompleteRequest, ComponentPress, ContextMenuInvocation, Interaction,
    ModalSubmission, SlashCommand, Snowflake,
};
use bugbot_service::{Identity, ServiceContext};

use crate::error::HandlerResult;
use crate::responder::InteractionResponder;

pub use buttons::{
    AddDetailsButton, CloseBugButton, DeleteBugButton, EditBugButton, ReopenBugButton,
};
pub use commands::{BugCommand, HighlightClipCommand, InfoCommand, SettingsCommand};
pub use modals::{BugDetailsModal, EditBugModal};

/// Everything a handler needs for one interaction
pub struct HandlerContext<'a> {
    pub services: &'a ServiceContext,
    pub interaction: &'a Interaction,
    /// Provisioned guild and user records of the actor
    pub identity: &'a Identity,
    pub responder: &'a dyn InteractionResponder,
}

impl HandlerContext<'_> {
    pub fn actor(&self) -> &Actor {
        &self.interaction.actor
    }

    pub fn guild_id(&self) -> Snowflake {
        self.identity.guild.guild_id
    }
}

/// Input of a command handler
#[derive(Debug, Clone, Copy)]
pub enum CommandInput<'a> {
    Slash(&'a SlashCommand),
    ContextMenu(&'a ContextMenuInvocation),
}

/// Handler for a slash or context menu command
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name as registered with the platform
    fn name(&self) -> &'static str;

    async fn execute(&self, ctx: &HandlerContext<'_>, input: CommandInput<'_>)
        -> HandlerResult<()>;

    /// Suggest values for the option being typed. No suggestions by default.
    async fn autocomplete(
        &self,
        ctx: &HandlerContext<'_>,
        _request: &AutocompleteRequest,
    ) -> HandlerResult<()> {
        ctx.responder.autocomplete(Vec::new()).await?;
        Ok(())
    }
}

/// Handler for a family of buttons
#[async_trait]
pub trait ButtonHandler: Send + Sync {
    /// Custom id family, e.g. `bugSolved`
    fn family(&self) -> &'static str;

    /// `payload` is the custom id after the family delimiter
    async fn execute(
        &self,
        ctx: &HandlerContext<'_>,
        press: &ComponentPress,
        payload: &str,
    ) -> HandlerResult<()>;
}

/// Handler for a family of modal forms
#[async_trait]
pub trait ModalHandler: Send + Sync {
    fn family(&self) -> &'static str;

    async fn execute(
        &self,
        ctx: &HandlerContext<'_>,
        submission: &ModalSubmission,
        payload: &str,
    ) -> HandlerResult<()>;
}
