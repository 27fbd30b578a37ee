//! Bug bot entry point
//!
//! Run with:
//! ```bash
//! cargo run -p bugbot-bot
//! ```
//!
//! Configuration is loaded from environment variables.

use anyhow::Context;
use bugbot_common::{try_init_tracing_with_config, AppConfig, AppError, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Bot stopped with an error");
        eprintln!("Error: {e:#}");
        let code = e.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
        std::process::exit(code);
    }
}

async fn run() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env()
        .map_err(AppError::from)
        .context("Failed to load configuration")?;

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        developer = ?config.discord.developer_id,
        max_media_mb = config.media.max_size_mb,
        "Configuration loaded"
    );

    bugbot_bot::run(config).await.context("Bot failed")?;

    Ok(())
}
