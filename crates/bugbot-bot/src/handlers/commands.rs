//! Command handlers: `/bug`, `/settings`, `/info` and the highlight menu

use async_trait::async_trait;
use bugbot_core::entities::GuildChannel;
use bugbot_core::{ContextTarget, SlashCommand};
use bugbot_service::dto::DraftRequest;
use bugbot_service::{render, BugService, HighlightService, SettingsService};
use tracing::debug;

use super::{CommandHandler, CommandInput, HandlerContext};
use crate::error::{HandlerError, HandlerResult};
use crate::responder::Reply;

fn slash<'a>(input: CommandInput<'a>) -> HandlerResult<&'a SlashCommand> {
    match input {
        CommandInput::Slash(cmd) => Ok(cmd),
        CommandInput::ContextMenu(menu) => Err(HandlerError::InvalidPayload(format!(
            "{} is not a context menu command",
            menu.name
        ))),
    }
}

fn subcommand(cmd: &SlashCommand) -> HandlerResult<&str> {
    cmd.subcommand
        .as_deref()
        .ok_or_else(|| HandlerError::InvalidPayload(format!("/{} without subcommand", cmd.name)))
}

// ============================================================================
// /bug
// ============================================================================

/// `/bug report title:<t> [media:<file>]` and `/bug help`
pub struct BugCommand;

impl BugCommand {
    async fn report(&self, ctx: &HandlerContext<'_>, cmd: &SlashCommand) -> HandlerResult<()> {
        let attachment = cmd.attachment("media");
        if attachment.is_some() {
            // Downloads can outlast the initial response window
            ctx.responder.defer_if_pending().await?;
        }

        let request = DraftRequest::new(cmd.string("title").unwrap_or_default());
        let draft = BugService::new(ctx.services)
            .create_draft(ctx.identity, request, attachment)
            .await?;

        let reply = Reply::ephemeral(render::DRAFT_PROMPT).row(render::add_details_row(&draft.bug));
        ctx.responder.send(reply).await?;
        Ok(())
    }
}

#[async_trait]
impl CommandHandler for BugCommand {
    fn name(&self) -> &'static str {
        "bug"
    }

    async fn execute(&self, ctx: &HandlerContext<'_>, input: CommandInput<'_>) -> HandlerResult<()> {
        let cmd = slash(input)?;
        match subcommand(cmd)? {
            "report" => self.report(ctx, cmd).await,
            "help" => {
                ctx.responder
                    .send(Reply::ephemeral(render::report_help()))
                    .await?;
                Ok(())
            }
            other => Err(HandlerError::InvalidPayload(format!(
                "unknown /bug subcommand {other}"
            ))),
        }
    }
}

// ============================================================================
// /settings
// ============================================================================

/// `/settings edit <slot> channel:<c>`, `/settings edit manager-roles` and `/settings view`
pub struct SettingsCommand;

/// Channel slot edited by a `/settings edit` subcommand
fn channel_slot(subcommand: &str) -> Option<GuildChannel> {
    match subcommand {
        "bugs" => Some(GuildChannel::Bugs),
        "highlights" => Some(GuildChannel::Highlights),
        "suggestions" => Some(GuildChannel::Suggestions),
        "command-channel" => Some(GuildChannel::Commands),
        _ => None,
    }
}

impl SettingsCommand {
    async fn edit(&self, ctx: &HandlerContext<'_>, cmd: &SlashCommand) -> HandlerResult<String> {
        let settings = SettingsService::new(ctx.services);
        let sub = subcommand(cmd)?;

        if sub == "manager-roles" {
            let role = cmd
                .role("role")
                .ok_or_else(|| HandlerError::InvalidPayload("missing role".into()))?;
            let add = cmd
                .boolean("add")
                .ok_or_else(|| HandlerError::InvalidPayload("missing add".into()))?;
            settings
                .set_manager_role(ctx.actor(), ctx.guild_id(), role, add)
                .await?;
            return Ok(render::manager_role_updated(role, add));
        }

        let slot = channel_slot(sub)
            .ok_or_else(|| HandlerError::InvalidPayload(format!("unknown setting {sub}")))?;
        let channel = cmd
            .channel("channel")
            .ok_or_else(|| HandlerError::InvalidPayload("missing channel".into()))?;
        settings
            .set_channel(ctx.actor(), ctx.guild_id(), slot, channel)
            .await?;
        Ok(render::channel_updated(sub, channel))
    }
}

#[async_trait]
impl CommandHandler for SettingsCommand {
    fn name(&self) -> &'static str {
        "settings"
    }

    async fn execute(&self, ctx: &HandlerContext<'_>, input: CommandInput<'_>) -> HandlerResult<()> {
        let cmd = slash(input)?;
        let content = match (cmd.subcommand_group.as_deref(), cmd.subcommand.as_deref()) {
            (Some("edit"), _) => self.edit(ctx, cmd).await?,
            (None, Some("view")) => {
                let guild = SettingsService::new(ctx.services)
                    .view(ctx.actor(), ctx.guild_id())
                    .await?;
                render::settings_overview(&guild)
            }
            (group, sub) => {
                return Err(HandlerError::InvalidPayload(format!(
                    "unknown /settings path {group:?} {sub:?}"
                )))
            }
        };
        ctx.responder.send(Reply::ephemeral(content)).await?;
        Ok(())
    }
}

// ============================================================================
// /info
// ============================================================================

/// `/info`: the stored guild and user records
pub struct InfoCommand;

#[async_trait]
impl CommandHandler for InfoCommand {
    fn name(&self) -> &'static str {
        "info"
    }

    async fn execute(&self, ctx: &HandlerContext<'_>, _input: CommandInput<'_>) -> HandlerResult<()> {
        let content = render::info(&ctx.identity.guild, &ctx.identity.user);
        ctx.responder.send(Reply::ephemeral(content)).await?;
        Ok(())
    }
}

// ============================================================================
// Highlight Clip
// ============================================================================

/// Message context menu that reposts clips to the highlights channel
pub struct HighlightClipCommand;

#[async_trait]
impl CommandHandler for HighlightClipCommand {
    fn name(&self) -> &'static str {
        "Highlight Clip"
    }

    async fn execute(&self, ctx: &HandlerContext<'_>, input: CommandInput<'_>) -> HandlerResult<()> {
        let CommandInput::ContextMenu(menu) = input else {
            return Err(HandlerError::InvalidPayload(
                "Highlight Clip is a message menu".into(),
            ));
        };
        let ContextTarget::Message(target) = &menu.target else {
            return Err(HandlerError::InvalidPayload(
                "Highlight Clip needs a message target".into(),
            ));
        };

        ctx.responder.defer_if_pending().await?;
        let highlight = HighlightService::new(ctx.services)
            .highlight(ctx.identity, ctx.actor(), target)
            .await?;
        debug!(uploaded = highlight.uploaded, skipped = highlight.skipped, "Highlight posted");

        ctx.responder
            .send(Reply::ephemeral(format!("Highlight sent! {}", highlight.url)))
            .await?;
        Ok(())
    }
}
