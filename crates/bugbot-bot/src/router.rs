//! Interaction router
//!
//! Single entry point for inbound interactions. Provisions the actor's
//! guild and user records, picks the handler from the registry, and turns
//! handler failures (including panics) into exactly one reply that respects
//! whatever the handler already sent.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use bugbot_core::{CustomId, Interaction, InteractionKind, OutgoingMessage, RemoteMessage};
use bugbot_service::services::error::GENERIC_ERROR_NOTICE;
use bugbot_service::{render, BugService, IdentityService, ServiceContext};
use futures::FutureExt;
use tracing::{debug, error, info, instrument, warn};

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{CommandInput, HandlerContext};
use crate::registry::HandlerRegistry;
use crate::responder::{InteractionResponder, Reply};

pub const GUILD_ONLY_NOTICE: &str = "This command can only be used in a server.";
pub const UNSUPPORTED_COMMAND: &str = "This command is not supported.";
pub const UNSUPPORTED_BUTTON: &str = "This button is not supported.";
pub const UNSUPPORTED_MODAL: &str = "This modal is not supported.";
pub const UNSUPPORTED_INTERACTION: &str = "This interaction is not supported.";

/// Prefix of an inline bug reference in chat, e.g. `bug#42`
pub const BUG_REFERENCE_PREFIX: &str = "bug#";

/// Routes interactions and chat messages to their handlers
#[derive(Debug, Clone)]
pub struct InteractionRouter {
    services: Arc<ServiceContext>,
    registry: Arc<HandlerRegistry>,
}

impl InteractionRouter {
    pub fn new(services: Arc<ServiceContext>, registry: Arc<HandlerRegistry>) -> Self {
        Self { services, registry }
    }

    pub fn services(&self) -> &ServiceContext {
        &self.services
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Handle one interaction to completion
    ///
    /// Never fails: every outcome is logged and, where the interaction
    /// accepts a reply, answered.
    #[instrument(skip_all, fields(interaction_id = %interaction.id))]
    pub async fn route(&self, interaction: &Interaction, responder: &dyn InteractionResponder) {
        let Some(guild_id) = interaction.guild_id else {
            debug!(kind = interaction.kind.label(), "Interaction outside a guild");
            if is_repliable(&interaction.kind) {
                notify(responder, Reply::ephemeral(GUILD_ONLY_NOTICE)).await;
            }
            return;
        };

        let identity = match IdentityService::new(&self.services)
            .provision(interaction.actor.user_id, guild_id)
            .await
        {
            Ok(identity) => identity,
            Err(e) => {
                error!(error = %e, guild = %guild_id, "Failed to provision actor");
                if is_repliable(&interaction.kind) {
                    notify(responder, Reply::ephemeral(GENERIC_ERROR_NOTICE)).await;
                }
                return;
            }
        };

        info!(
            actor = %interaction.actor.user_id,
            guild = %guild_id,
            kind = interaction.kind.label(),
            discriminator = interaction.kind.discriminator().unwrap_or("-"),
            "Interaction received"
        );

        let ctx = HandlerContext {
            services: &self.services,
            interaction,
            identity: &identity,
            responder,
        };

        match AssertUnwindSafe(self.dispatch(&ctx)).catch_unwind().await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => report(interaction, responder, e).await,
            Err(_) => {
                error!(kind = interaction.kind.label(), "Interaction handler panicked");
                if is_repliable(&interaction.kind) {
                    notify(responder, Reply::ephemeral(GENERIC_ERROR_NOTICE)).await;
                }
            }
        }
    }

    async fn dispatch(&self, ctx: &HandlerContext<'_>) -> HandlerResult<()> {
        match &ctx.interaction.kind {
            InteractionKind::Command(cmd) => match self.registry.command(&cmd.name) {
                Some(handler) => handler.execute(ctx, CommandInput::Slash(cmd)).await,
                None => unsupported(ctx, UNSUPPORTED_COMMAND).await,
            },
            InteractionKind::ContextMenu(menu) => match self.registry.command(&menu.name) {
                Some(handler) => handler.execute(ctx, CommandInput::ContextMenu(menu)).await,
                None => unsupported(ctx, UNSUPPORTED_COMMAND).await,
            },
            InteractionKind::Autocomplete(request) => {
                match self.registry.command(&request.command) {
                    Some(handler) => handler.autocomplete(ctx, request).await,
                    None => {
                        ctx.responder.autocomplete(Vec::new()).await?;
                        Ok(())
                    }
                }
            }
            InteractionKind::Button(press) => {
                let id = CustomId::parse(&press.custom_id);
                match self.registry.button(id.discriminator()) {
                    Some(handler) => handler.execute(ctx, press, id.payload()).await,
                    None => unsupported(ctx, UNSUPPORTED_BUTTON).await,
                }
            }
            InteractionKind::Modal(submission) => {
                let id = CustomId::parse(&submission.custom_id);
                match self.registry.modal(id.discriminator()) {
                    Some(handler) => handler.execute(ctx, submission, id.payload()).await,
                    None => unsupported(ctx, UNSUPPORTED_MODAL).await,
                }
            }
            InteractionKind::Unsupported { kind, repliable } => {
                if *repliable {
                    unsupported(ctx, UNSUPPORTED_INTERACTION).await
                } else {
                    warn!(kind = %kind, "Unsupported interaction ignored");
                    Ok(())
                }
            }
        }
    }

    /// Answer an inline `bug#<id>` reference with a link to the bug
    ///
    /// Stays silent when the reference does not resolve to a published bug
    /// of the message's guild.
    #[instrument(skip_all, fields(message_id = %message.id))]
    pub async fn route_message(&self, message: &RemoteMessage) {
        let Some(guild_id) = message.guild_id else {
            return;
        };
        let Some(bug_id) = find_bug_reference(&message.content) else {
            return;
        };

        let reference = match BugService::new(&self.services)
            .lookup_reference(guild_id, bug_id)
            .await
        {
            Ok(Some(reference)) => reference,
            Ok(None) => {
                debug!(bug_id, "Bug reference not resolved");
                return;
            }
            Err(e) => {
                warn!(bug_id, error = %e, "Bug reference lookup failed");
                return;
            }
        };

        let reply = OutgoingMessage::text(render::bug_reference(&reference))
            .without_mentions()
            .reply_to(message.id);
        if let Err(e) = self
            .services
            .platform()
            .send_message(message.channel_id, reply)
            .await
        {
            warn!(bug_id, error = %e, "Failed to answer bug reference");
        }
    }
}

/// First `bug#<digits>` reference in a chat message
pub fn find_bug_reference(content: &str) -> Option<i64> {
    content
        .match_indices(BUG_REFERENCE_PREFIX)
        .find_map(|(at, prefix)| {
            let rest = &content[at + prefix.len()..];
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            rest[..end].parse().ok()
        })
}

/// Whether the interaction accepts a message reply
fn is_repliable(kind: &InteractionKind) -> bool {
    match kind {
        InteractionKind::Autocomplete(_) => false,
        InteractionKind::Unsupported { repliable, .. } => *repliable,
        _ => true,
    }
}

async fn unsupported(ctx: &HandlerContext<'_>, notice: &str) -> HandlerResult<()> {
    warn!(
        kind = ctx.interaction.kind.label(),
        discriminator = ctx.interaction.kind.discriminator().unwrap_or("-"),
        "No handler registered"
    );
    ctx.responder.send(Reply::ephemeral(notice)).await?;
    Ok(())
}

/// Reply to a failed handler: its notice when the failure is expected, the
/// generic notice otherwise
async fn report(interaction: &Interaction, responder: &dyn InteractionResponder, err: HandlerError) {
    let content = match err.user_message() {
        Some(message) => {
            debug!(
                error = %err,
                code = err.error_code(),
                category = %err.category(),
                "Interaction rejected"
            );
            message
        }
        None => {
            error!(
                error = %err,
                code = err.error_code(),
                category = %err.category(),
                kind = interaction.kind.label(),
                "Interaction handler failed"
            );
            GENERIC_ERROR_NOTICE.to_string()
        }
    };

    if is_repliable(&interaction.kind) {
        notify(responder, Reply::ephemeral(content)).await;
    }
}

async fn notify(responder: &dyn InteractionResponder, reply: Reply) {
    if let Err(e) = responder.send(reply).await {
        warn!(error = %e, "Failed to deliver interaction reply");
    }
}
