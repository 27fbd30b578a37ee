//! Message rendering
//!
//! Builds the embeds, control rows, forms and notice texts the bot posts.
//! Nothing here touches a repository or the platform.

use bugbot_core::entities::{Bug, BugStatus, Guild, Media, MediaKind, User};
use bugbot_core::{
    bug_custom_id, family, ActionRow, Actor, Button, ButtonStyle, Embed, EmbedAuthor, FileUpload,
    ModalForm, OutgoingMessage, Snowflake, TextInput, TextInputStyle, MAX_DESCRIPTION_LEN,
    MAX_TITLE_LEN,
};
use chrono::{DateTime, Utc};

use crate::dto::{BugReference, Published, DESCRIPTION_FIELD, TITLE_FIELD};

/// Longest thread name the platform accepts
pub const THREAD_NAME_LIMIT: usize = 128;
/// Discussion threads archive after an hour of inactivity
pub const THREAD_AUTO_ARCHIVE_MINUTES: u16 = 60;
/// Reaction added to posted highlights
pub const HIGHLIGHT_REACTION: &str = "⭐";

pub const DRAFT_PROMPT: &str = "Click the button below to add more details to the bug report.";
pub const EDITED_NOTICE: &str = ":white_check_mark: Bug edited";
pub const LEGACY_NOTICE: &str = "This bug was using a legacy system. Please click the button again.";

// ============================================================================
// Bug message
// ============================================================================

/// Embed author for an actor
pub fn actor_author(actor: &Actor) -> EmbedAuthor {
    EmbedAuthor {
        name: actor.name.clone(),
        icon_url: actor.avatar_url.clone(),
    }
}

/// Controls under a published bug; the first button follows the status
pub fn controls(bug: &Bug) -> ActionRow {
    let toggle = match bug.status {
        BugStatus::Open => Button::new(
            bug_custom_id(family::BUG_SOLVED, bug.id),
            "Close",
            ButtonStyle::Primary,
        ),
        BugStatus::Closed => Button::new(
            bug_custom_id(family::BUG_REOPEN, bug.id),
            "Reopen",
            ButtonStyle::Primary,
        ),
    };
    vec![
        toggle,
        Button::new(bug_custom_id(family::BUG_EDIT, bug.id), "Edit", ButtonStyle::Secondary),
        Button::new(bug_custom_id(family::BUG_DELETE, bug.id), "Delete", ButtonStyle::Danger),
    ]
}

pub fn bug_footer(bug_id: i64) -> String {
    format!("Submit your own bug with /bug • bug #{bug_id}")
}

/// Embed mirroring a bug
pub fn bug_embed(bug: &Bug, author: EmbedAuthor, media: Option<MediaKind>) -> Embed {
    Embed {
        author: Some(author),
        title: Some(bug.title.clone()),
        description: Some(bug.description.clone()),
        footer: Some(bug_footer(bug.id)),
        image_url: match media {
            Some(MediaKind::Image) => Some(format!("attachment://{}", MediaKind::Image.file_name())),
            _ => None,
        },
        timestamp: Some(bug.created_at),
        ..Embed::default()
    }
}

/// Full message for a newly published bug
pub fn bug_message(bug: &Bug, author: EmbedAuthor, media: Option<&Media>) -> OutgoingMessage {
    let mut message = OutgoingMessage::default()
        .embed(bug_embed(bug, author, media.map(|m| m.kind)))
        .row(controls(bug));
    if let Some(media) = media {
        message = message.file(FileUpload {
            name: media.kind.file_name().to_string(),
            data: media.data.clone(),
        });
    }
    message
}

/// Discussion thread name, cut to the platform limit
pub fn thread_name(bug: &Bug) -> String {
    let name = format!("#{} - {}", bug.id, bug.title);
    if name.chars().count() <= THREAD_NAME_LIMIT {
        return name;
    }
    let mut cut: String = name.chars().take(THREAD_NAME_LIMIT - 1).collect();
    cut.push('…');
    cut
}

/// First message in a discussion thread
pub fn thread_intro(bug: &Bug, reporter: Snowflake) -> String {
    format!(
        "Discussion for bug #{}. {} and the moderators can close, edit or delete the report with the buttons above.",
        bug.id,
        reporter.user_mention()
    )
}

// ============================================================================
// Forms and prompts
// ============================================================================

fn bug_form(custom_id: String, title: String, bug: &Bug, prefill_description: bool) -> ModalForm {
    let description = if prefill_description {
        bug.description.as_str()
    } else {
        ""
    };
    ModalForm {
        custom_id,
        title,
        inputs: vec![
            TextInput::new(TITLE_FIELD, "Title", TextInputStyle::Short)
                .placeholder("Enter a title for the bug report.")
                .value(bug.title.as_str())
                .max_length(MAX_TITLE_LEN as u16),
            TextInput::new(DESCRIPTION_FIELD, "Description", TextInputStyle::Paragraph)
                .placeholder("Enter a description for the bug report.")
                .value(description)
                .max_length(MAX_DESCRIPTION_LEN as u16),
        ],
    }
}

/// Details form for a draft, prefilled with its title
pub fn details_form(bug: &Bug) -> ModalForm {
    bug_form(
        bug_custom_id(family::BUG, bug.id),
        "Create a new bug report".to_string(),
        bug,
        false,
    )
}

/// Edit form for a published bug, prefilled with its title and description
pub fn edit_form(bug: &Bug) -> ModalForm {
    bug_form(
        bug_custom_id(family::EDIT_BUG, bug.id),
        format!("Editing Bug #{}", bug.id),
        bug,
        true,
    )
}

/// "Add Details" button under the draft prompt
pub fn add_details_row(bug: &Bug) -> ActionRow {
    vec![Button::new(
        bug_custom_id(family::BUG, bug.id),
        "Add Details",
        ButtonStyle::Primary,
    )]
}

pub fn report_help() -> String {
    "To report a bug, you can use the `/bug report` command. \nYou will be asked to provide a summary of the bug when running the command, and will be asked to provide more details later.".to_string()
}

// ============================================================================
// Notices
// ============================================================================

pub fn publish_ack(published: &Published) -> String {
    match &published.thread_url {
        Some(thread) => format!(
            "Thanks, your bug report has been sent! [View it here]({}). A [thread]({thread}) has been created for further discussion.",
            published.message_url
        ),
        None => format!(
            "Thanks, your bug report has been sent! [View it here]({})",
            published.message_url
        ),
    }
}

fn status_verb(status: BugStatus) -> &'static str {
    match status {
        BugStatus::Open => "reopened",
        BugStatus::Closed => "closed",
    }
}

/// Thread notice naming who changed the status
pub fn status_notice(bug_id: i64, status: BugStatus, actor: Snowflake) -> String {
    format!(
        ":white_check_mark: Bug #{bug_id} has been {} by {}",
        status_verb(status),
        actor.user_mention()
    )
}

/// Private acknowledgment for the actor
pub fn status_ack(bug_id: i64, status: BugStatus) -> String {
    format!("Bug #{bug_id} has been {}", status_verb(status))
}

pub fn delete_notice(bug_id: i64, actor: Snowflake) -> String {
    format!("Bug #{bug_id} has been deleted by {}", actor.user_mention())
}

pub fn delete_ack(bug_id: i64) -> String {
    format!("Bug #{bug_id} has been deleted")
}

/// Reply to a `bug#<id>` mention
pub fn bug_reference(reference: &BugReference) -> String {
    format!(
        "> *{}*, reported by {}.\n-# [Jump to bug]({})",
        reference.title,
        reference.reporter.user_mention(),
        reference.url
    )
}

/// Highlight post body: header, jump link and clip links
pub fn highlight_content(author: Snowflake, jump_url: &str, clip_urls: &[String]) -> String {
    let mut content = format!(
        ":star: New highlight from {}\n-# [Jump to message]({jump_url})",
        author.user_mention()
    );
    for (index, url) in clip_urls.iter().enumerate() {
        content.push_str(&format!(" • [Attachment {}]({url})", index + 1));
    }
    content
}

// ============================================================================
// Settings and info
// ============================================================================

fn channel_or_none(channel: Option<Snowflake>) -> String {
    channel.map_or_else(|| "None".to_string(), |c| c.channel_mention())
}

/// `/settings view` reply
pub fn settings_overview(guild: &Guild) -> String {
    let roles = if guild.manager_roles.is_empty() {
        "None".to_string()
    } else {
        guild
            .manager_roles
            .iter()
            .map(|role| format!("- {}", role.role_mention()))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "# Channels\n\
         **Highlights Channel:** {}\n\
         **Bug Channel:** {}\n\
         **Suggestions Forum:** {}\n\
         **Commands Channel:** {}\n\n\
         # Manager Roles\n\
         {roles}\n\n\
         Management roles can manage bugs (close, edit, delete) and send clips to the highlights channel.",
        channel_or_none(guild.highlights_channel),
        channel_or_none(guild.bug_channel),
        channel_or_none(guild.suggestion_forum),
        channel_or_none(guild.commands_channel),
    )
}

pub fn channel_updated(setting: &str, channel: Snowflake) -> String {
    format!(
        "Successfully updated the {setting} channel to {}.",
        channel.channel_mention()
    )
}

pub fn manager_role_updated(role: Snowflake, added: bool) -> String {
    format!(
        "Successfully {} the role {} as a manager role.",
        if added { "added" } else { "removed" },
        role.role_mention()
    )
}

fn created_line(at: DateTime<Utc>) -> String {
    format!("**Created** {} (<t:{}>)", at.format("%a %b %d %Y"), at.timestamp())
}

/// `/info` reply
pub fn info(guild: &Guild, user: &User) -> String {
    format!(
        "## Guild Info\n**Guild ID** {}\n{}\n## User Info\n**User ID** {}\n**Guild ID** {}\n{}",
        guild.id,
        created_line(guild.created_at),
        user.id,
        user.guild_id,
        created_line(user.created_at),
    )
}
