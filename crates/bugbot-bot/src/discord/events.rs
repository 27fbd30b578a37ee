//! Gateway event handler

use async_trait::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::application::{Command, Interaction as GatewayInteraction};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use tracing::{debug, error, info};

use super::commands;
use super::convert;
use super::responder::{InteractionHandle, SerenityResponder};
use crate::router::InteractionRouter;

/// Feeds gateway events into the router
pub struct BotEventHandler {
    router: InteractionRouter,
}

impl BotEventHandler {
    pub fn new(router: InteractionRouter) -> Self {
        Self { router }
    }
}

#[async_trait]
impl EventHandler for BotEventHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, guilds = ready.guilds.len(), "Connected to gateway");

        match Command::set_global_commands(&ctx.http, commands::definitions()).await {
            Ok(registered) => info!(count = registered.len(), "Application commands registered"),
            Err(e) => error!(error = %e, "Failed to register application commands"),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: GatewayInteraction) {
        let (converted, handle) = match interaction {
            GatewayInteraction::Command(raw) => {
                (convert::command_interaction(&raw), InteractionHandle::Command(raw))
            }
            GatewayInteraction::Autocomplete(raw) => (
                convert::autocomplete_interaction(&raw),
                InteractionHandle::Command(raw),
            ),
            GatewayInteraction::Component(raw) => (
                convert::component_interaction(&raw),
                InteractionHandle::Component(raw),
            ),
            GatewayInteraction::Modal(raw) => {
                (convert::modal_interaction(&raw), InteractionHandle::Modal(raw))
            }
            other => {
                debug!(kind = ?other.kind(), "Ignoring interaction");
                return;
            }
        };

        let responder = SerenityResponder::new(ctx.http.clone(), handle);
        self.router.route(&converted, &responder).await;
    }

    async fn message(&self, _ctx: Context, message: Message) {
        if message.author.bot {
            return;
        }
        self.router.route_message(&convert::message(&message)).await;
    }
}
