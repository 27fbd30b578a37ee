//! Application configuration structs
//!
//! Loads configuration from environment variables (and an optional `.env` file).
//! Per-guild settings are stored on the guild record, not here.

use serde::Deserialize;
use std::env;

use bugbot_core::Snowflake;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub discord: DiscordConfig,
    pub database: DatabaseConfig,
    pub media: MediaConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Chat platform credentials
#[derive(Clone)]
pub struct DiscordConfig {
    pub token: String,
    /// User allowed to run the settings command without "manage guild"
    pub developer_id: Option<Snowflake>,
}

// Keep the token out of logs
impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"<redacted>")
            .field("developer_id", &self.developer_id)
            .finish()
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,
}

/// Attachment limits
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_max_media_size_mb")]
    pub max_size_mb: u64,
}

impl MediaConfig {
    /// Size limit in bytes
    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        self.max_size_mb * 1024 * 1024
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_size_mb: default_max_media_size_mb(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "bugbot".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_migrations_dir() -> String {
    "./crates/bugbot-db/migrations".to_string()
}

fn default_max_media_size_mb() -> u64 {
    90
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: match lookup("APP_ENV") {
                    Some(value) => Environment::parse(&value)
                        .ok_or(ConfigError::InvalidValue("APP_ENV", value))?,
                    None => default_env(),
                },
            },
            discord: DiscordConfig {
                token: required("DISCORD_TOKEN")?,
                developer_id: lookup("BOT_DEVELOPER_ID")
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| {
                        Snowflake::parse(&v).map_err(|_| ConfigError::InvalidValue("BOT_DEVELOPER_ID", v))
                    })
                    .transpose()?,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                migrations_dir: lookup("MIGRATIONS_DIR").unwrap_or_else(default_migrations_dir),
            },
            media: MediaConfig {
                max_size_mb: parse_or(&lookup, "MAX_MEDIA_SIZE_MB", default_max_media_size_mb)?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, value)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
