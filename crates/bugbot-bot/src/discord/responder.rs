//! Interaction responder backed by the serenity HTTP client

use std::sync::Arc;

use async_trait::async_trait;
use bugbot_core::{ModalForm, PlatformError, PlatformResult};
use parking_lot::Mutex;
use serenity::builder::{
    CreateAutocompleteResponse, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EditInteractionResponse,
};
use serenity::http::Http;
use serenity::model::application::{CommandInteraction, ComponentInteraction, ModalInteraction};

use super::convert::{create_modal, create_rows, no_mentions, platform_error};
use crate::responder::{InteractionResponder, Reply, ResponseState};

/// The raw interaction a responder answers
pub enum InteractionHandle {
    /// Slash, context menu and autocomplete interactions
    Command(CommandInteraction),
    Component(ComponentInteraction),
    Modal(ModalInteraction),
}

pub struct SerenityResponder {
    http: Arc<Http>,
    handle: InteractionHandle,
    state: Mutex<ResponseState>,
}

impl SerenityResponder {
    pub fn new(http: Arc<Http>, handle: InteractionHandle) -> Self {
        Self {
            http,
            handle,
            state: Mutex::new(ResponseState::Pending),
        }
    }

    fn set_state(&self, state: ResponseState) {
        *self.state.lock() = state;
    }

    async fn create_response(&self, response: CreateInteractionResponse) -> PlatformResult<()> {
        let result = match &self.handle {
            InteractionHandle::Command(i) => i.create_response(&self.http, response).await,
            InteractionHandle::Component(i) => i.create_response(&self.http, response).await,
            InteractionHandle::Modal(i) => i.create_response(&self.http, response).await,
        };
        result.map_err(platform_error)
    }

    async fn edit_response(&self, edit: EditInteractionResponse) -> PlatformResult<()> {
        let result = match &self.handle {
            InteractionHandle::Command(i) => i.edit_response(&self.http, edit).await,
            InteractionHandle::Component(i) => i.edit_response(&self.http, edit).await,
            InteractionHandle::Modal(i) => i.edit_response(&self.http, edit).await,
        };
        result.map(|_| ()).map_err(platform_error)
    }

    async fn create_followup(&self, followup: CreateInteractionResponseFollowup) -> PlatformResult<()> {
        let result = match &self.handle {
            InteractionHandle::Command(i) => i.create_followup(&self.http, followup).await,
            InteractionHandle::Component(i) => i.create_followup(&self.http, followup).await,
            InteractionHandle::Modal(i) => i.create_followup(&self.http, followup).await,
        };
        result.map(|_| ()).map_err(platform_error)
    }
}

#[async_trait]
impl InteractionResponder for SerenityResponder {
    fn state(&self) -> ResponseState {
        *self.state.lock()
    }

    async fn reply(&self, reply: Reply) -> PlatformResult<()> {
        let mut message = CreateInteractionResponseMessage::new()
            .content(reply.content)
            .ephemeral(reply.ephemeral)
            .components(create_rows(&reply.components));
        if reply.suppress_mentions {
            message = message.allowed_mentions(no_mentions());
        }
        self.create_response(CreateInteractionResponse::Message(message))
            .await?;
        self.set_state(ResponseState::Replied);
        Ok(())
    }

    async fn defer(&self, ephemeral: bool) -> PlatformResult<()> {
        let message = CreateInteractionResponseMessage::new().ephemeral(ephemeral);
        self.create_response(CreateInteractionResponse::Defer(message))
            .await?;
        self.set_state(ResponseState::Deferred);
        Ok(())
    }

    async fn edit_reply(&self, reply: Reply) -> PlatformResult<()> {
        let mut edit = EditInteractionResponse::new()
            .content(reply.content)
            .components(create_rows(&reply.components));
        if reply.suppress_mentions {
            edit = edit.allowed_mentions(no_mentions());
        }
        self.edit_response(edit).await?;
        self.set_state(ResponseState::Replied);
        Ok(())
    }

    async fn follow_up(&self, reply: Reply) -> PlatformResult<()> {
        let mut followup = CreateInteractionResponseFollowup::new()
            .content(reply.content)
            .ephemeral(reply.ephemeral)
            .components(create_rows(&reply.components));
        if reply.suppress_mentions {
            followup = followup.allowed_mentions(no_mentions());
        }
        self.create_followup(followup).await
    }

    async fn show_modal(&self, form: ModalForm) -> PlatformResult<()> {
        if matches!(self.handle, InteractionHandle::Modal(_)) {
            return Err(PlatformError::Http(
                "a modal submission cannot open another modal".into(),
            ));
        }
        self.create_response(CreateInteractionResponse::Modal(create_modal(&form)))
            .await?;
        self.set_state(ResponseState::Replied);
        Ok(())
    }

    async fn autocomplete(&self, choices: Vec<String>) -> PlatformResult<()> {
        let response = choices
            .into_iter()
            .fold(CreateAutocompleteResponse::new(), |response, choice| {
                response.add_string_choice(choice.clone(), choice)
            });
        self.create_response(CreateInteractionResponse::Autocomplete(response))
            .await?;
        self.set_state(ResponseState::Replied);
        Ok(())
    }
}
