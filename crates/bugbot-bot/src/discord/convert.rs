//! Conversions between serenity models and the platform-neutral types

use std::collections::HashMap;
use std::num::NonZeroU64;

use bugbot_core::{
    ActionRow, Actor, AutocompleteRequest, ButtonStyle, CommandOption, ComponentPress,
    ContextMenuInvocation, ContextTarget, Embed, EmbedAuthor, EmbedProvider, Interaction,
    InteractionKind, ModalForm, ModalSubmission, OptionValue, Permissions, PlatformError,
    PlatformResult, RemoteAttachment, RemoteMessage, SlashCommand, Snowflake, TextInput,
    TextInputStyle,
};
use chrono::DateTime;
use serenity::builder::{
    CreateActionRow, CreateAllowedMentions, CreateButton, CreateEmbed, CreateEmbedAuthor,
    CreateEmbedFooter, CreateInputText, CreateModal,
};
use serenity::model::application::{
    ActionRowComponent, CommandData, CommandDataOption, CommandDataOptionValue,
    CommandDataResolved, CommandInteraction, CommandType, ComponentInteraction,
    ComponentInteractionDataKind, InputTextStyle, ModalInteraction, ResolvedTarget,
};
use serenity::model::channel::{Attachment, Message};
use serenity::model::guild::Member;
use serenity::model::user::User;
use serenity::model::Timestamp;

// ============================================================================
// Ids and errors
// ============================================================================

pub fn snowflake(id: impl Into<u64>) -> Snowflake {
    Snowflake::from_u64(id.into())
}

/// Typed serenity id from a snowflake; zero is rejected
pub fn to_id<T: From<NonZeroU64>>(id: Snowflake) -> PlatformResult<T> {
    NonZeroU64::new(id.as_u64())
        .map(T::from)
        .ok_or_else(|| PlatformError::Http(format!("invalid snowflake {id}")))
}

/// Classify a serenity error; 404 and 403 responses mean the resource is gone
pub fn platform_error(err: serenity::Error) -> PlatformError {
    if let serenity::Error::Http(http) = &err {
        match http.status_code().map(|status| status.as_u16()) {
            Some(404) => return PlatformError::NotFound,
            Some(403) => return PlatformError::Forbidden,
            _ => {}
        }
    }
    PlatformError::Http(err.to_string())
}

// ============================================================================
// Inbound
// ============================================================================

fn actor(user: &User, member: Option<&Member>) -> Actor {
    let name = member
        .and_then(|m| m.nick.clone())
        .or_else(|| user.global_name.clone())
        .unwrap_or_else(|| user.name.clone());

    Actor {
        user_id: snowflake(user.id),
        name,
        avatar_url: Some(user.face()),
        role_ids: member
            .map(|m| m.roles.iter().map(|role| snowflake(*role)).collect())
            .unwrap_or_default(),
        permissions: member
            .and_then(|m| m.permissions)
            .map_or_else(Permissions::empty, |p| Permissions::from_raw(p.bits())),
    }
}

pub fn attachment(attachment: &Attachment) -> RemoteAttachment {
    RemoteAttachment {
        url: attachment.url.clone(),
        filename: attachment.filename.clone(),
        content_type: attachment.content_type.clone(),
        size: u64::from(attachment.size),
    }
}

fn embed(embed: &serenity::model::channel::Embed) -> Embed {
    Embed {
        author: embed.author.as_ref().map(|a| EmbedAuthor {
            name: a.name.clone(),
            icon_url: a.icon_url.clone(),
        }),
        provider: embed.provider.as_ref().map(|p| EmbedProvider {
            name: p.name.clone(),
            url: p.url.clone(),
        }),
        title: embed.title.clone(),
        description: embed.description.clone(),
        url: embed.url.clone(),
        footer: embed.footer.as_ref().map(|f| f.text.clone()),
        image_url: embed.image.as_ref().map(|i| i.url.clone()),
        color: embed.colour.map(|c| c.0),
        timestamp: embed
            .timestamp
            .and_then(|t| DateTime::from_timestamp(t.unix_timestamp(), 0)),
    }
}

pub fn message(message: &Message) -> RemoteMessage {
    RemoteMessage {
        id: snowflake(message.id),
        channel_id: snowflake(message.channel_id),
        guild_id: message.guild_id.map(snowflake),
        author_id: snowflake(message.author.id),
        content: message.content.clone(),
        embeds: message.embeds.iter().map(embed).collect(),
        attachments: message.attachments.iter().map(attachment).collect(),
        thread_id: message.thread.as_ref().map(|thread| snowflake(thread.id)),
    }
}

/// Interaction payloads omit the guild on embedded messages
fn message_in_guild(raw: &Message, guild_id: Option<Snowflake>) -> RemoteMessage {
    let mut converted = message(raw);
    converted.guild_id = converted.guild_id.or(guild_id);
    converted
}

fn flatten_options(
    options: &[CommandDataOption],
    resolved: &CommandDataResolved,
    command: &mut SlashCommand,
) {
    for option in options {
        let value = match &option.value {
            CommandDataOptionValue::SubCommandGroup(inner) => {
                command.subcommand_group = Some(option.name.clone());
                flatten_options(inner, resolved, command);
                continue;
            }
            CommandDataOptionValue::SubCommand(inner) => {
                command.subcommand = Some(option.name.clone());
                flatten_options(inner, resolved, command);
                continue;
            }
            CommandDataOptionValue::String(s) => OptionValue::String(s.clone()),
            CommandDataOptionValue::Integer(i) => OptionValue::Integer(*i),
            CommandDataOptionValue::Number(n) => OptionValue::Number(*n),
            CommandDataOptionValue::Boolean(b) => OptionValue::Boolean(*b),
            CommandDataOptionValue::User(id) => OptionValue::User(snowflake(*id)),
            CommandDataOptionValue::Channel(id) => OptionValue::Channel(snowflake(*id)),
            CommandDataOptionValue::Role(id) => OptionValue::Role(snowflake(*id)),
            CommandDataOptionValue::Attachment(id) => match resolved.attachments.get(id) {
                Some(file) => OptionValue::Attachment(attachment(file)),
                None => continue,
            },
            _ => continue,
        };
        command.options.push(CommandOption {
            name: option.name.clone(),
            value,
        });
    }
}

fn focused_option(options: &[CommandDataOption]) -> Option<(&str, &str)> {
    options.iter().find_map(|option| match &option.value {
        CommandDataOptionValue::Autocomplete { value, .. } => {
            Some((option.name.as_str(), value.as_str()))
        }
        CommandDataOptionValue::SubCommand(inner)
        | CommandDataOptionValue::SubCommandGroup(inner) => focused_option(inner),
        _ => None,
    })
}

fn command_kind(data: &CommandData, guild_id: Option<Snowflake>) -> InteractionKind {
    if data.kind == CommandType::ChatInput {
        let mut command = SlashCommand::new(data.name.clone());
        flatten_options(&data.options, &data.resolved, &mut command);
        return InteractionKind::Command(command);
    }

    let target = match data.target() {
        Some(ResolvedTarget::Message(target)) => {
            ContextTarget::Message(Box::new(message_in_guild(target, guild_id)))
        }
        Some(ResolvedTarget::User(user, _)) => ContextTarget::User(snowflake(user.id)),
        _ => {
            return InteractionKind::Unsupported {
                kind: "context_menu".into(),
                repliable: true,
            }
        }
    };
    InteractionKind::ContextMenu(ContextMenuInvocation {
        name: data.name.clone(),
        target,
    })
}

fn envelope(
    id: impl Into<u64>,
    guild_id: Option<Snowflake>,
    channel_id: impl Into<u64>,
    actor: Actor,
    kind: InteractionKind,
) -> Interaction {
    Interaction {
        id: snowflake(id),
        guild_id,
        channel_id: snowflake(channel_id),
        actor,
        kind,
    }
}

pub fn command_interaction(raw: &CommandInteraction) -> Interaction {
    let guild_id = raw.guild_id.map(snowflake);
    envelope(
        raw.id,
        guild_id,
        raw.channel_id,
        actor(&raw.user, raw.member.as_deref()),
        command_kind(&raw.data, guild_id),
    )
}

pub fn autocomplete_interaction(raw: &CommandInteraction) -> Interaction {
    let (focused, value) = focused_option(&raw.data.options).unwrap_or_default();
    let request = AutocompleteRequest {
        command: raw.data.name.clone(),
        focused_option: focused.to_string(),
        value: value.to_string(),
    };
    envelope(
        raw.id,
        raw.guild_id.map(snowflake),
        raw.channel_id,
        actor(&raw.user, raw.member.as_deref()),
        InteractionKind::Autocomplete(request),
    )
}

pub fn component_interaction(raw: &ComponentInteraction) -> Interaction {
    let guild_id = raw.guild_id.map(snowflake);
    let kind = match raw.data.kind {
        ComponentInteractionDataKind::Button => InteractionKind::Button(ComponentPress {
            custom_id: raw.data.custom_id.clone(),
            message: message_in_guild(&raw.message, guild_id),
        }),
        _ => InteractionKind::Unsupported {
            kind: "select_menu".into(),
            repliable: true,
        },
    };
    envelope(
        raw.id,
        guild_id,
        raw.channel_id,
        actor(&raw.user, raw.member.as_ref()),
        kind,
    )
}

pub fn modal_interaction(raw: &ModalInteraction) -> Interaction {
    let mut fields = HashMap::new();
    for row in &raw.data.components {
        for component in &row.components {
            if let ActionRowComponent::InputText(input) = component {
                fields.insert(
                    input.custom_id.clone(),
                    input.value.clone().unwrap_or_default(),
                );
            }
        }
    }
    let submission = ModalSubmission {
        custom_id: raw.data.custom_id.clone(),
        fields,
    };
    envelope(
        raw.id,
        raw.guild_id.map(snowflake),
        raw.channel_id,
        actor(&raw.user, raw.member.as_ref()),
        InteractionKind::Modal(submission),
    )
}

// ============================================================================
// Outbound
// ============================================================================

pub fn create_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new();
    if let Some(author) = &embed.author {
        let mut create = CreateEmbedAuthor::new(&author.name);
        if let Some(icon) = &author.icon_url {
            create = create.icon_url(icon);
        }
        builder = builder.author(create);
    }
    if let Some(title) = &embed.title {
        builder = builder.title(title);
    }
    if let Some(description) = &embed.description {
        builder = builder.description(description);
    }
    if let Some(url) = &embed.url {
        builder = builder.url(url);
    }
    if let Some(footer) = &embed.footer {
        builder = builder.footer(CreateEmbedFooter::new(footer));
    }
    if let Some(image) = &embed.image_url {
        builder = builder.image(image);
    }
    if let Some(color) = embed.color {
        builder = builder.colour(color);
    }
    if let Some(timestamp) = embed
        .timestamp
        .and_then(|at| Timestamp::from_unix_timestamp(at.timestamp()).ok())
    {
        builder = builder.timestamp(timestamp);
    }
    builder
}

fn button_style(style: ButtonStyle) -> serenity::model::application::ButtonStyle {
    use serenity::model::application::ButtonStyle as Style;
    match style {
        ButtonStyle::Primary => Style::Primary,
        ButtonStyle::Secondary => Style::Secondary,
        ButtonStyle::Success => Style::Success,
        ButtonStyle::Danger => Style::Danger,
    }
}

pub fn create_row(row: &ActionRow) -> CreateActionRow {
    CreateActionRow::Buttons(
        row.iter()
            .map(|button| {
                CreateButton::new(&button.custom_id)
                    .label(&button.label)
                    .style(button_style(button.style))
            })
            .collect(),
    )
}

pub fn create_rows(rows: &[ActionRow]) -> Vec<CreateActionRow> {
    rows.iter().map(create_row).collect()
}

fn create_input(input: &TextInput) -> CreateInputText {
    let style = match input.style {
        TextInputStyle::Short => InputTextStyle::Short,
        TextInputStyle::Paragraph => InputTextStyle::Paragraph,
    };
    let mut builder =
        CreateInputText::new(style, &input.label, &input.custom_id).required(input.required);
    if let Some(placeholder) = &input.placeholder {
        builder = builder.placeholder(placeholder);
    }
    if let Some(value) = &input.value {
        builder = builder.value(value);
    }
    if let Some(max) = input.max_length {
        builder = builder.max_length(max);
    }
    builder
}

pub fn create_modal(form: &ModalForm) -> CreateModal {
    CreateModal::new(&form.custom_id, &form.title).components(
        form.inputs
            .iter()
            .map(|input| CreateActionRow::InputText(create_input(input)))
            .collect(),
    )
}

/// Allowed mentions that ping nobody
pub fn no_mentions() -> CreateAllowedMentions {
    CreateAllowedMentions::new()
}
