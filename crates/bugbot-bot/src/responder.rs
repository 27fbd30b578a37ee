//! Interaction responses
//!
//! Every interaction accepts one initial response (a reply, a deferral or a
//! modal); later messages edit that response or follow up on it.
//! [`InteractionResponder`] tracks which of these already happened so a
//! reply can always be delivered without answering twice.

use async_trait::async_trait;
use bugbot_core::{ActionRow, ModalForm, PlatformResult};

/// How far an interaction has been answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseState {
    #[default]
    Pending,
    /// Acknowledged; the response will be filled in later
    Deferred,
    /// An initial response (message or modal) has been sent
    Replied,
}

impl ResponseState {
    pub fn is_acknowledged(self) -> bool {
        self != Self::Pending
    }
}

/// A message sent in response to an interaction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub content: String,
    /// Visible only to the actor
    pub ephemeral: bool,
    pub components: Vec<ActionRow>,
    pub suppress_mentions: bool,
}

impl Reply {
    /// Reply only the actor sees
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
            ..Self::default()
        }
    }

    /// Reply the whole channel sees
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn row(mut self, row: ActionRow) -> Self {
        self.components.push(row);
        self
    }

    pub fn without_mentions(mut self) -> Self {
        self.suppress_mentions = true;
        self
    }
}

/// Response channel of one interaction
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    fn state(&self) -> ResponseState;

    /// Send the initial response
    async fn reply(&self, reply: Reply) -> PlatformResult<()>;

    /// Acknowledge now, answer later
    async fn defer(&self, ephemeral: bool) -> PlatformResult<()>;

    /// Replace the initial (or deferred) response
    async fn edit_reply(&self, reply: Reply) -> PlatformResult<()>;

    /// Send an additional message after the initial response
    async fn follow_up(&self, reply: Reply) -> PlatformResult<()>;

    /// Open a modal form as the initial response
    async fn show_modal(&self, form: ModalForm) -> PlatformResult<()>;

    /// Answer an autocomplete request
    async fn autocomplete(&self, choices: Vec<String>) -> PlatformResult<()>;

    /// Deliver a reply whatever the current state
    async fn send(&self, reply: Reply) -> PlatformResult<()> {
        match self.state() {
            ResponseState::Pending => self.reply(reply).await,
            ResponseState::Deferred => self.edit_reply(reply).await,
            ResponseState::Replied => self.follow_up(reply).await,
        }
    }

    /// Defer privately unless already acknowledged
    async fn defer_if_pending(&self) -> PlatformResult<()> {
        if self.state().is_acknowledged() {
            return Ok(());
        }
        self.defer(true).await
    }
}
