//! Guild entity - one record per chat-platform server

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Per-guild configuration slots that point at a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuildChannel {
    /// Where published bug reports are posted
    Bugs,
    /// Where highlight clips are posted
    Highlights,
    /// Forum used for suggestions
    Suggestions,
    /// Channel bot commands are expected in
    Commands,
    /// Announcement broadcasts
    Announcements,
}

impl GuildChannel {
    /// Column name backing this slot
    pub fn column(self) -> &'static str {
        match self {
            Self::Bugs => "bug_channel",
            Self::Highlights => "highlights_channel",
            Self::Suggestions => "suggestion_forum",
            Self::Commands => "commands_channel",
            Self::Announcements => "announcements_channel",
        }
    }

    /// Human-readable label used in settings replies
    pub fn label(self) -> &'static str {
        match self {
            Self::Bugs => "Bug channel",
            Self::Highlights => "Highlights channel",
            Self::Suggestions => "Suggestion forum",
            Self::Commands => "Command channel",
            Self::Announcements => "Announcements channel",
        }
    }
}

/// Guild record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    /// Internal row id
    pub id: i64,
    /// Platform guild id (natural key)
    pub guild_id: Snowflake,
    pub bug_channel: Option<Snowflake>,
    pub highlights_channel: Option<Snowflake>,
    pub suggestion_forum: Option<Snowflake>,
    pub commands_channel: Option<Snowflake>,
    pub announcements_channel: Option<Snowflake>,
    /// Roles whose holders may moderate bug reports, in insertion order
    pub manager_roles: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl Guild {
    /// Create an unconfigured Guild
    pub fn new(id: i64, guild_id: Snowflake) -> Self {
        Self {
            id,
            guild_id,
            bug_channel: None,
            highlights_channel: None,
            suggestion_forum: None,
            commands_channel: None,
            announcements_channel: None,
            manager_roles: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Read a configured channel slot
    pub fn channel(&self, slot: GuildChannel) -> Option<Snowflake> {
        match slot {
            GuildChannel::Bugs => self.bug_channel,
            GuildChannel::Highlights => self.highlights_channel,
            GuildChannel::Suggestions => self.suggestion_forum,
            GuildChannel::Commands => self.commands_channel,
            GuildChannel::Announcements => self.announcements_channel,
        }
    }

    /// Write a channel slot
    pub fn set_channel(&mut self, slot: GuildChannel, channel: Option<Snowflake>) {
        match slot {
            GuildChannel::Bugs => self.bug_channel = channel,
            GuildChannel::Highlights => self.highlights_channel = channel,
            GuildChannel::Suggestions => self.suggestion_forum = channel,
            GuildChannel::Commands => self.commands_channel = channel,
            GuildChannel::Announcements => self.announcements_channel = channel,
        }
    }

    /// Check if a role is in the manager set
    #[inline]
    pub fn is_manager_role(&self, role: Snowflake) -> bool {
        self.manager_roles.contains(&role)
    }

    /// Check if any of the given roles is a manager role
    pub fn has_manager_role(&self, roles: &[Snowflake]) -> bool {
        roles.iter().any(|role| self.is_manager_role(*role))
    }

    /// Append a manager role. Returns false if it was already present.
    pub fn add_manager_role(&mut self, role: Snowflake) -> bool {
        if self.is_manager_role(role) {
            return false;
        }
        self.manager_roles.push(role);
        true
    }

    /// Remove a manager role. Returns false if it was not present.
    pub fn remove_manager_role(&mut self, role: Snowflake) -> bool {
        let before = self.manager_roles.len();
        self.manager_roles.retain(|r| *r != role);
        self.manager_roles.len() != before
    }
}
