//! Bot bootstrap
//!
//! Wires the database, repositories, services and handlers together and
//! runs the gateway client until shutdown.

use std::sync::Arc;

use bugbot_common::{AppConfig, AppError, AppResult};
use bugbot_db::{
    create_pool, run_migrations, DatabaseConfig, PgBugRepository, PgGuildRepository,
    PgMediaRepository, PgUserRepository,
};
use bugbot_service::{ServiceContextBuilder, ServiceSettings};
use serenity::http::Http;
use serenity::model::gateway::GatewayIntents;
use serenity::Client;
use tracing::{info, warn};

use crate::discord::{BotEventHandler, SerenityPlatform};
use crate::registry::HandlerRegistry;
use crate::router::InteractionRouter;

/// Gateway events the bot subscribes to
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
}

/// Initialize all dependencies and create the `InteractionRouter`
pub async fn create_router(config: &AppConfig, http: Arc<Http>) -> AppResult<InteractionRouter> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool, config.database.migrations_dir.as_str())
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create service context
    let services = ServiceContextBuilder::new()
        .guild_repo(Arc::new(PgGuildRepository::new(pool.clone())))
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .bug_repo(Arc::new(PgBugRepository::new(pool.clone())))
        .media_repo(Arc::new(PgMediaRepository::new(pool)))
        .platform(Arc::new(SerenityPlatform::new(http)))
        .settings(ServiceSettings::from(config))
        .build()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let registry = HandlerRegistry::with_defaults();
    info!(commands = ?registry.command_names(), "Handlers registered");

    Ok(InteractionRouter::new(Arc::new(services), Arc::new(registry)))
}

/// Run the bot with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let http = Arc::new(Http::new(&config.discord.token));
    let router = create_router(&config, http).await?;

    let mut client = Client::builder(&config.discord.token, intents())
        .event_handler(BotEventHandler::new(router))
        .await
        .map_err(|e| AppError::Platform(e.to_string()))?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                shard_manager.shutdown_all().await;
            }
            Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
        }
    });

    info!(app = %config.app.name, "Starting gateway client...");
    client
        .start()
        .await
        .map_err(|e| AppError::Platform(e.to_string()))
}
