//! Test fixtures and data generators
//!
//! Provides the in-memory store backing every repository port, plus builders
//! for actors and interactions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use bugbot_core::entities::{Bug, BugStatus, Guild, GuildChannel, Media, MediaKind, User};
use bugbot_core::{
    Actor, BugRepository, CommandOption, ComponentPress, ContextMenuInvocation, ContextTarget,
    DomainError, GuildRepository, Interaction, InteractionKind, MediaRepository,
    ModalSubmission, OptionValue, Permissions, RemoteAttachment, RemoteMessage, RepoResult,
    SlashCommand,
    Snowflake, UserRepository,
};
use parking_lot::Mutex;

pub const GUILD_ID: Snowflake = Snowflake::new(1000);
pub const BUG_CHANNEL: Snowflake = Snowflake::new(2000);
pub const HIGHLIGHTS_CHANNEL: Snowflake = Snowflake::new(2001);
pub const COMMAND_CHANNEL: Snowflake = Snowflake::new(2002);
pub const MANAGER_ROLE: Snowflake = Snowflake::new(3000);
pub const MEMBER_ROLE: Snowflake = Snowflake::new(3001);
pub const REPORTER: Snowflake = Snowflake::new(4001);
pub const MANAGER: Snowflake = Snowflake::new(4002);
pub const BYSTANDER: Snowflake = Snowflake::new(4003);

/// Counter for unique interaction ids
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// Get a unique snowflake for test data
pub fn unique_id() -> Snowflake {
    Snowflake::new(900_000 + COUNTER.fetch_add(1, Ordering::SeqCst))
}

// ============================================================================
// Actors
// ============================================================================

pub fn actor(user_id: Snowflake, roles: &[Snowflake]) -> Actor {
    Actor {
        user_id,
        name: format!("user{user_id}"),
        avatar_url: Some(format!("https://cdn.example/avatars/{user_id}.png")),
        role_ids: roles.to_vec(),
        permissions: Permissions::empty(),
    }
}

/// Reporter without manager standing
pub fn reporter() -> Actor {
    actor(REPORTER, &[MEMBER_ROLE])
}

/// Member holding the guild's manager role
pub fn manager() -> Actor {
    actor(MANAGER, &[MANAGER_ROLE])
}

/// Member who neither owns the bug nor manages
pub fn bystander() -> Actor {
    actor(BYSTANDER, &[MEMBER_ROLE])
}

/// Member allowed to change settings
pub fn admin() -> Actor {
    let mut admin = actor(Snowflake::new(4009), &[]);
    admin.permissions = Permissions::MANAGE_GUILD;
    admin
}

// ============================================================================
// Interactions
// ============================================================================

pub fn interaction(actor: Actor, channel_id: Snowflake, kind: InteractionKind) -> Interaction {
    Interaction {
        id: unique_id(),
        guild_id: Some(GUILD_ID),
        channel_id,
        actor,
        kind,
    }
}

/// `/bug report title:<title>`
pub fn report_command(actor: Actor, title: &str) -> Interaction {
    let mut cmd = SlashCommand::new("bug");
    cmd.subcommand = Some("report".into());
    cmd.options.push(CommandOption {
        name: "title".into(),
        value: OptionValue::String(title.into()),
    });
    interaction(actor, COMMAND_CHANNEL, InteractionKind::Command(cmd))
}

/// `/bug report` with a `media` attachment
pub fn report_with_media(actor: Actor, title: &str, attachment: RemoteAttachment) -> Interaction {
    let mut interaction = report_command(actor, title);
    if let InteractionKind::Command(cmd) = &mut interaction.kind {
        cmd.options.push(CommandOption {
            name: "media".into(),
            value: OptionValue::Attachment(attachment),
        });
    }
    interaction
}

pub fn attachment(url: &str, content_type: &str, size: u64) -> RemoteAttachment {
    RemoteAttachment {
        url: url.into(),
        filename: url.rsplit('/').next().unwrap_or(url).into(),
        content_type: Some(content_type.into()),
        size,
    }
}

pub fn slash_command(actor: Actor, cmd: SlashCommand) -> Interaction {
    interaction(actor, COMMAND_CHANNEL, InteractionKind::Command(cmd))
}

pub fn button(actor: Actor, custom_id: &str, message: RemoteMessage) -> Interaction {
    let channel_id = message.channel_id;
    interaction(
        actor,
        channel_id,
        InteractionKind::Button(ComponentPress {
            custom_id: custom_id.into(),
            message,
        }),
    )
}

pub fn modal(
    actor: Actor,
    channel_id: Snowflake,
    custom_id: &str,
    title: &str,
    description: &str,
) -> Interaction {
    let mut fields = HashMap::new();
    fields.insert("title".to_string(), title.to_string());
    fields.insert("description".to_string(), description.to_string());
    interaction(
        actor,
        channel_id,
        InteractionKind::Modal(ModalSubmission {
            custom_id: custom_id.into(),
            fields,
        }),
    )
}

pub fn highlight_menu(actor: Actor, target: RemoteMessage) -> Interaction {
    interaction(
        actor,
        target.channel_id,
        InteractionKind::ContextMenu(ContextMenuInvocation {
            name: "Highlight Clip".into(),
            target: ContextTarget::Message(Box::new(target)),
        }),
    )
}

/// A chat message posted by a member
pub fn chat_message(author: Snowflake, channel_id: Snowflake, content: &str) -> RemoteMessage {
    RemoteMessage {
        id: unique_id(),
        channel_id,
        guild_id: Some(GUILD_ID),
        author_id: author,
        content: content.into(),
        embeds: Vec::new(),
        attachments: Vec::new(),
        thread_id: None,
    }
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
struct StoreState {
    next_id: i64,
    guilds: Vec<Guild>,
    users: Vec<User>,
    bugs: Vec<Bug>,
    deleted: Vec<i64>,
    media: Vec<Media>,
}

impl StoreState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn live_bug_mut(&mut self, id: i64) -> RepoResult<&mut Bug> {
        if self.deleted.contains(&id) {
            return Err(DomainError::BugNotFound(id));
        }
        self.bugs
            .iter_mut()
            .find(|bug| bug.id == id)
            .ok_or(DomainError::BugNotFound(id))
    }

    fn guild_mut(&mut self, guild_id: Snowflake) -> RepoResult<&mut Guild> {
        self.guilds
            .iter_mut()
            .find(|guild| guild.guild_id == guild_id)
            .ok_or(DomainError::GuildNotFound(guild_id))
    }
}

/// Every repository port over one locked state
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guild_count(&self) -> usize {
        self.state.lock().guilds.len()
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().users.len()
    }

    /// Bug by id, ignoring tombstones
    pub fn bug(&self, id: i64) -> Option<Bug> {
        self.state.lock().bugs.iter().find(|bug| bug.id == id).cloned()
    }

    /// User row by internal id
    pub fn user(&self, id: i64) -> Option<User> {
        self.state.lock().users.iter().find(|user| user.id == id).cloned()
    }

    pub fn is_deleted(&self, id: i64) -> bool {
        self.state.lock().deleted.contains(&id)
    }

    pub fn bugs(&self) -> Vec<Bug> {
        self.state.lock().bugs.clone()
    }

    pub fn media_count(&self) -> usize {
        self.state.lock().media.len()
    }
}

#[async_trait]
impl GuildRepository for MemoryStore {
    async fn find_by_guild_id(&self, guild_id: Snowflake) -> RepoResult<Option<Guild>> {
        let state = self.state.lock();
        Ok(state.guilds.iter().find(|g| g.guild_id == guild_id).cloned())
    }

    async fn get_or_create(&self, guild_id: Snowflake) -> RepoResult<Guild> {
        let mut state = self.state.lock();
        if let Some(guild) = state.guilds.iter().find(|g| g.guild_id == guild_id) {
            return Ok(guild.clone());
        }
        let guild = Guild::new(state.next_id(), guild_id);
        state.guilds.push(guild.clone());
        Ok(guild)
    }

    async fn set_channel(
        &self,
        guild_id: Snowflake,
        slot: GuildChannel,
        channel: Option<Snowflake>,
    ) -> RepoResult<Guild> {
        let mut state = self.state.lock();
        let guild = state.guild_mut(guild_id)?;
        guild.set_channel(slot, channel);
        Ok(guild.clone())
    }

    async fn add_manager_role(
        &self,
        guild_id: Snowflake,
        role: Snowflake,
    ) -> RepoResult<Option<Guild>> {
        let mut state = self.state.lock();
        let guild = state.guild_mut(guild_id)?;
        Ok(guild.add_manager_role(role).then(|| guild.clone()))
    }

    async fn remove_manager_role(
        &self,
        guild_id: Snowflake,
        role: Snowflake,
    ) -> RepoResult<Option<Guild>> {
        let mut state = self.state.lock();
        let guild = state.guild_mut(guild_id)?;
        Ok(guild.remove_manager_role(role).then(|| guild.clone()))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find(&self, user_id: Snowflake, guild_id: Snowflake) -> RepoResult<Option<User>> {
        let state = self.state.lock();
        Ok(state
            .users
            .iter()
            .find(|u| u.user_id == user_id && u.guild_id == guild_id)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let state = self.state.lock();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_or_create(&self, user_id: Snowflake, guild_id: Snowflake) -> RepoResult<User> {
        let mut state = self.state.lock();
        if !state.guilds.iter().any(|g| g.guild_id == guild_id) {
            return Err(DomainError::GuildNotFound(guild_id));
        }
        if let Some(user) = state
            .users
            .iter()
            .find(|u| u.user_id == user_id && u.guild_id == guild_id)
        {
            return Ok(user.clone());
        }
        let user = User::new(state.next_id(), user_id, guild_id);
        state.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl BugRepository for MemoryStore {
    async fn create_draft(&self, user_id: i64, title: &str, description: &str) -> RepoResult<Bug> {
        let mut state = self.state.lock();
        let bug = Bug::draft(state.next_id(), user_id, title.into(), description.into());
        state.bugs.push(bug.clone());
        Ok(bug)
    }

    async fn create_published(
        &self,
        user_id: i64,
        title: &str,
        description: &str,
        message_id: Snowflake,
        status: BugStatus,
    ) -> RepoResult<Bug> {
        let mut state = self.state.lock();
        if let Some(bug) = state
            .bugs
            .iter()
            .find(|b| b.message_id == Some(message_id))
        {
            return Ok(bug.clone());
        }
        let mut bug = Bug::draft(state.next_id(), user_id, title.into(), description.into());
        bug.publish(title.into(), description.into(), message_id)?;
        bug.status = status;
        state.bugs.push(bug.clone());
        Ok(bug)
    }

    async fn publish(
        &self,
        id: i64,
        title: &str,
        description: &str,
        message_id: Snowflake,
    ) -> RepoResult<Bug> {
        let mut state = self.state.lock();
        let bug = state.live_bug_mut(id)?;
        bug.publish(title.into(), description.into(), message_id)?;
        Ok(bug.clone())
    }

    async fn set_status(&self, id: i64, status: BugStatus) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.live_bug_mut(id)?.status = status;
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Bug>> {
        let state = self.state.lock();
        if state.deleted.contains(&id) {
            return Ok(None);
        }
        Ok(state.bugs.iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_message_id(&self, message_id: Snowflake) -> RepoResult<Option<Bug>> {
        let state = self.state.lock();
        Ok(state
            .bugs
            .iter()
            .find(|b| b.message_id == Some(message_id) && !state.deleted.contains(&b.id))
            .cloned())
    }

    async fn update_title_description(
        &self,
        id: i64,
        title: &str,
        description: &str,
    ) -> RepoResult<()> {
        let mut state = self.state.lock();
        let bug = state.live_bug_mut(id)?;
        bug.title = title.into();
        bug.description = description.into();
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.live_bug_mut(id)?;
        state.deleted.push(id);
        Ok(())
    }
}

#[async_trait]
impl MediaRepository for MemoryStore {
    async fn create(
        &self,
        kind: MediaKind,
        data: &[u8],
        user_id: i64,
        bug_id: Option<i64>,
    ) -> RepoResult<Media> {
        let mut state = self.state.lock();
        let media = Media::new(state.next_id(), kind, data.to_vec(), user_id, bug_id);
        state.media.push(media.clone());
        Ok(media)
    }

    async fn find_by_bug(&self, bug_id: i64) -> RepoResult<Option<Media>> {
        let state = self.state.lock();
        Ok(state.media.iter().find(|m| m.bug_id == Some(bug_id)).cloned())
    }
}
