//! Test helpers for driving the router end to end
//!
//! `RecordingPlatform` stands in for the chat platform and keeps every message
//! it was asked to send; `RecordingResponder` keeps every interaction response.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bugbot_bot::{HandlerRegistry, InteractionResponder, InteractionRouter, Reply, ResponseState};
use bugbot_core::entities::GuildChannel;
use bugbot_core::{
    bug_custom_id, ActionRow, ChannelKind, ChatPlatform, GuildRepository, Interaction,
    MessageEdit, ModalForm, OutgoingMessage, PlatformError, PlatformResult, RemoteMessage,
    Snowflake,
};
use bugbot_service::{ServiceContextBuilder, ServiceSettings};
use parking_lot::Mutex;

use crate::fixtures::{
    actor, button, modal, report_command, MemoryStore, BUG_CHANNEL, COMMAND_CHANNEL, GUILD_ID,
    MANAGER_ROLE,
};

/// Author id of everything the bot posts
pub const BOT_ID: Snowflake = Snowflake::new(1);

// ============================================================================
// Platform
// ============================================================================

/// A message held by the fake platform
#[derive(Debug, Clone)]
pub struct StoredMessage {
    pub message: RemoteMessage,
    pub components: Vec<ActionRow>,
    pub reply_to: Option<Snowflake>,
    pub suppress_mentions: bool,
}

#[derive(Default)]
struct PlatformState {
    next_id: i64,
    messages: HashMap<(Snowflake, Snowflake), StoredMessage>,
    /// Every send, in order, including to channels whose messages were removed since
    sent: Vec<(Snowflake, OutgoingMessage)>,
    thread_names: Vec<String>,
    thread_members: Vec<(Snowflake, Snowflake)>,
    locked_threads: Vec<Snowflake>,
    reactions: Vec<(Snowflake, String)>,
    channel_kinds: HashMap<Snowflake, ChannelKind>,
    downloads: HashMap<String, Vec<u8>>,
    members: HashMap<String, Snowflake>,
}

impl PlatformState {
    fn next_id(&mut self) -> Snowflake {
        self.next_id += 1;
        Snowflake::new(500_000 + self.next_id)
    }
}

/// In-memory chat platform recording every call
#[derive(Default)]
pub struct RecordingPlatform {
    state: Mutex<PlatformState>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self, channel_id: Snowflake, message_id: Snowflake) -> Option<StoredMessage> {
        self.state
            .lock()
            .messages
            .get(&(channel_id, message_id))
            .cloned()
    }

    /// Place a message on the platform without going through `send_message`
    pub fn seed_message(&self, message: RemoteMessage, components: Vec<ActionRow>) {
        self.state.lock().messages.insert(
            (message.channel_id, message.id),
            StoredMessage {
                message,
                components,
                reply_to: None,
                suppress_mentions: false,
            },
        );
    }

    /// Delete a message out of band, as a moderator would
    pub fn remove_message(&self, channel_id: Snowflake, message_id: Snowflake) {
        self.state.lock().messages.remove(&(channel_id, message_id));
    }

    /// Contents of every message sent to a channel or thread
    pub fn sent_to(&self, channel_id: Snowflake) -> Vec<OutgoingMessage> {
        self.state
            .lock()
            .sent
            .iter()
            .filter(|(channel, _)| *channel == channel_id)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn sent_count(&self) -> usize {
        self.state.lock().sent.len()
    }

    pub fn thread_names(&self) -> Vec<String> {
        self.state.lock().thread_names.clone()
    }

    pub fn thread_members(&self) -> Vec<(Snowflake, Snowflake)> {
        self.state.lock().thread_members.clone()
    }

    pub fn locked_threads(&self) -> Vec<Snowflake> {
        self.state.lock().locked_threads.clone()
    }

    pub fn reactions(&self) -> Vec<(Snowflake, String)> {
        self.state.lock().reactions.clone()
    }

    pub fn set_channel_kind(&self, channel_id: Snowflake, kind: ChannelKind) {
        self.state.lock().channel_kinds.insert(channel_id, kind);
    }

    pub fn set_download(&self, url: impl Into<String>, data: Vec<u8>) {
        self.state.lock().downloads.insert(url.into(), data);
    }

    /// Make a guild member findable by name
    pub fn add_member(&self, name: impl Into<String>, user_id: Snowflake) {
        self.state.lock().members.insert(name.into(), user_id);
    }
}

#[async_trait]
impl ChatPlatform for RecordingPlatform {
    async fn send_message(
        &self,
        channel_id: Snowflake,
        message: OutgoingMessage,
    ) -> PlatformResult<RemoteMessage> {
        let mut state = self.state.lock();
        let id = state.next_id();
        let remote = RemoteMessage {
            id,
            channel_id,
            guild_id: Some(GUILD_ID),
            author_id: BOT_ID,
            content: message.content.clone().unwrap_or_default(),
            embeds: message.embeds.clone(),
            attachments: Vec::new(),
            thread_id: None,
        };
        state.messages.insert(
            (channel_id, id),
            StoredMessage {
                message: remote.clone(),
                components: message.components.clone(),
                reply_to: message.reply_to,
                suppress_mentions: message.suppress_mentions,
            },
        );
        state.sent.push((channel_id, message));
        Ok(remote)
    }

    async fn fetch_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> PlatformResult<RemoteMessage> {
        self.state
            .lock()
            .messages
            .get(&(channel_id, message_id))
            .map(|stored| stored.message.clone())
            .ok_or(PlatformError::NotFound)
    }

    async fn edit_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        edit: MessageEdit,
    ) -> PlatformResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .messages
            .get_mut(&(channel_id, message_id))
            .ok_or(PlatformError::NotFound)?;
        if let Some(content) = edit.content {
            stored.message.content = content;
        }
        if let Some(embeds) = edit.embeds {
            stored.message.embeds = embeds;
        }
        if let Some(components) = edit.components {
            stored.components = components;
        }
        Ok(())
    }

    async fn delete_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> PlatformResult<()> {
        self.state
            .lock()
            .messages
            .remove(&(channel_id, message_id))
            .map(|_| ())
            .ok_or(PlatformError::NotFound)
    }

    async fn start_thread(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        name: &str,
        _auto_archive_minutes: u16,
    ) -> PlatformResult<Snowflake> {
        let mut state = self.state.lock();
        let thread_id = state.next_id();
        let stored = state
            .messages
            .get_mut(&(channel_id, message_id))
            .ok_or(PlatformError::NotFound)?;
        stored.message.thread_id = Some(thread_id);
        state.thread_names.push(name.to_string());
        Ok(thread_id)
    }

    async fn add_thread_member(
        &self,
        thread_id: Snowflake,
        user_id: Snowflake,
    ) -> PlatformResult<()> {
        self.state.lock().thread_members.push((thread_id, user_id));
        Ok(())
    }

    async fn lock_thread(&self, thread_id: Snowflake) -> PlatformResult<()> {
        self.state.lock().locked_threads.push(thread_id);
        Ok(())
    }

    async fn react(
        &self,
        _channel_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> PlatformResult<()> {
        self.state
            .lock()
            .reactions
            .push((message_id, emoji.to_string()));
        Ok(())
    }

    async fn download(&self, url: &str, max_bytes: u64) -> PlatformResult<Vec<u8>> {
        let state = self.state.lock();
        let data = state.downloads.get(url).ok_or(PlatformError::NotFound)?;
        if data.len() as u64 > max_bytes {
            return Err(PlatformError::Http(format!("{url} exceeds {max_bytes} bytes")));
        }
        Ok(data.clone())
    }

    async fn channel_kind(&self, channel_id: Snowflake) -> PlatformResult<ChannelKind> {
        Ok(self
            .state
            .lock()
            .channel_kinds
            .get(&channel_id)
            .copied()
            .unwrap_or(ChannelKind::Text))
    }

    async fn find_member(
        &self,
        _guild_id: Snowflake,
        name: &str,
    ) -> PlatformResult<Option<Snowflake>> {
        Ok(self.state.lock().members.get(name).copied())
    }
}

// ============================================================================
// Responder
// ============================================================================

/// One interaction response, as sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Reply(Reply),
    Defer { ephemeral: bool },
    EditReply(Reply),
    FollowUp(Reply),
    Modal(ModalForm),
    Autocomplete(Vec<String>),
}

#[derive(Default)]
struct ResponderState {
    state: ResponseState,
    responses: Vec<Response>,
}

/// Interaction responder that enforces the single initial response
#[derive(Default)]
pub struct RecordingResponder {
    inner: Mutex<ResponderState>,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn responses(&self) -> Vec<Response> {
        self.inner.lock().responses.clone()
    }

    /// Text of every reply, edit and follow-up
    pub fn messages(&self) -> Vec<Reply> {
        self.inner
            .lock()
            .responses
            .iter()
            .filter_map(|response| match response {
                Response::Reply(reply) | Response::EditReply(reply) | Response::FollowUp(reply) => {
                    Some(reply.clone())
                }
                _ => None,
            })
            .collect()
    }

    pub fn last_content(&self) -> Option<String> {
        self.messages().last().map(|reply| reply.content.clone())
    }

    pub fn modal(&self) -> Option<ModalForm> {
        self.inner
            .lock()
            .responses
            .iter()
            .find_map(|response| match response {
                Response::Modal(form) => Some(form.clone()),
                _ => None,
            })
    }

    fn initial(&self, response: Response, next: ResponseState) -> PlatformResult<()> {
        let mut inner = self.inner.lock();
        if inner.state.is_acknowledged() {
            return Err(PlatformError::Http("interaction already acknowledged".into()));
        }
        inner.state = next;
        inner.responses.push(response);
        Ok(())
    }

    fn later(&self, response: Response) -> PlatformResult<()> {
        let mut inner = self.inner.lock();
        if !inner.state.is_acknowledged() {
            return Err(PlatformError::Http("interaction not acknowledged".into()));
        }
        inner.responses.push(response);
        Ok(())
    }
}

#[async_trait]
impl InteractionResponder for RecordingResponder {
    fn state(&self) -> ResponseState {
        self.inner.lock().state
    }

    async fn reply(&self, reply: Reply) -> PlatformResult<()> {
        self.initial(Response::Reply(reply), ResponseState::Replied)
    }

    async fn defer(&self, ephemeral: bool) -> PlatformResult<()> {
        self.initial(Response::Defer { ephemeral }, ResponseState::Deferred)
    }

    async fn edit_reply(&self, reply: Reply) -> PlatformResult<()> {
        self.later(Response::EditReply(reply))
    }

    async fn follow_up(&self, reply: Reply) -> PlatformResult<()> {
        self.later(Response::FollowUp(reply))
    }

    async fn show_modal(&self, form: ModalForm) -> PlatformResult<()> {
        self.initial(Response::Modal(form), ResponseState::Replied)
    }

    async fn autocomplete(&self, choices: Vec<String>) -> PlatformResult<()> {
        self.initial(Response::Autocomplete(choices), ResponseState::Replied)
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Router wired to an in-memory store and a recording platform
pub struct TestBot {
    pub store: Arc<MemoryStore>,
    pub platform: Arc<RecordingPlatform>,
    pub router: InteractionRouter,
}

impl TestBot {
    pub fn new() -> Self {
        Self::with_registry(HandlerRegistry::with_defaults())
    }

    pub fn with_registry(registry: HandlerRegistry) -> Self {
        let store = Arc::new(MemoryStore::new());
        let platform = Arc::new(RecordingPlatform::new());
        let services = ServiceContextBuilder::new()
            .guild_repo(store.clone())
            .user_repo(store.clone())
            .bug_repo(store.clone())
            .media_repo(store.clone())
            .platform(platform.clone())
            .settings(ServiceSettings::default())
            .build()
            .expect("all dependencies provided");

        Self {
            store,
            platform,
            router: InteractionRouter::new(Arc::new(services), Arc::new(registry)),
        }
    }

    /// Provision the test guild with a bug channel and a manager role
    pub async fn configure(&self) {
        let store = self.store.as_ref();
        GuildRepository::get_or_create(store, GUILD_ID)
            .await
            .expect("guild provisioned");
        store
            .set_channel(GUILD_ID, GuildChannel::Bugs, Some(BUG_CHANNEL))
            .await
            .expect("bug channel set");
        store
            .add_manager_role(GUILD_ID, MANAGER_ROLE)
            .await
            .expect("manager role set");
    }

    /// Route one interaction and return what it answered
    pub async fn dispatch(&self, interaction: Interaction) -> RecordingResponder {
        let responder = RecordingResponder::new();
        self.router.route(&interaction, &responder).await;
        responder
    }

    /// Run `/bug report` and return the new draft's id
    pub async fn draft(&self, reporter: Snowflake, title: &str) -> i64 {
        let responder = self
            .dispatch(report_command(actor(reporter, &[]), title))
            .await;
        let reply = responder
            .messages()
            .into_iter()
            .next()
            .expect("draft prompt");
        let custom_id = &reply.components[0][0].custom_id;
        custom_id
            .trim_start_matches("bug-")
            .parse()
            .expect("draft id in button")
    }

    /// Draft and publish a bug, returning its id
    pub async fn report(&self, reporter: Snowflake, title: &str, description: &str) -> i64 {
        let bug_id = self.draft(reporter, title).await;
        let custom_id = bug_custom_id("bug", bug_id);
        self.dispatch(modal(
            actor(reporter, &[]),
            COMMAND_CHANNEL,
            &custom_id,
            title,
            description,
        ))
        .await;
        bug_id
    }

    /// The published message of a bug, as currently on the platform
    pub fn bug_message(&self, bug_id: i64) -> Option<StoredMessage> {
        let message_id = self.store.bug(bug_id)?.message_id?;
        self.platform.message(BUG_CHANNEL, message_id)
    }

    /// Press a control under a published bug
    pub async fn press(
        &self,
        presser: bugbot_core::Actor,
        family: &str,
        bug_id: i64,
    ) -> RecordingResponder {
        let message = self
            .bug_message(bug_id)
            .map(|stored| stored.message)
            .expect("bug message on platform");
        self.dispatch(button(presser, &bug_custom_id(family, bug_id), message))
            .await
    }
}

impl Default for TestBot {
    fn default() -> Self {
        Self::new()
    }
}
