/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * the SQLite connection pool.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables, with sensible defaults
 * for local development when possible. Only `JWT_SECRET` is required.
 *
 * # Error Handling
 *
 * Missing or malformed values are reported as `ConfigError` and abort startup.
 * An unset `AI_API_KEY` is not an error: AI endpoints answer 503 instead.
 */

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::backend::ai::client::DEFAULT_BASE_URL;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://studentnest.db";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;
pub const DEFAULT_AI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_AUTO_REPLY_DELAY_MS: u64 = 2000;
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Hosted text generation settings
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub token_ttl_days: i64,
    pub bcrypt_cost: u32,
    /// `None` disables the AI endpoints
    pub ai: Option<AiConfig>,
    pub auto_reply_delay: Duration,
    pub static_dir: String,
}

impl ServerConfig {
    pub fn builder(jwt_secret: impl Into<String>) -> ServerConfigBuilder {
        ServerConfigBuilder::new(jwt_secret)
    }

    /// Load configuration from the process environment
    ///
    /// Call `dotenv::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let mut builder = ServerConfigBuilder::new(jwt_secret);

        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            builder = builder.port(parse_var("SERVER_PORT", &port)?);
        }
        if let Some(days) = lookup("TOKEN_TTL_DAYS") {
            builder = builder.token_ttl_days(parse_var("TOKEN_TTL_DAYS", &days)?);
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_var("BCRYPT_COST", &cost)?);
        }
        if let Some(delay) = lookup("AUTO_REPLY_DELAY_MS") {
            let millis: u64 = parse_var("AUTO_REPLY_DELAY_MS", &delay)?;
            builder = builder.auto_reply_delay(Duration::from_millis(millis));
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            builder = builder.static_dir(dir);
        }
        if let Some(api_key) = lookup("AI_API_KEY").filter(|k| !k.is_empty()) {
            builder = builder.ai(AiConfig {
                api_key,
                base_url: lookup("AI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                model: lookup("AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
            });
        }

        Ok(builder.build())
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

/// Builder for `ServerConfig`
#[derive(Debug, Clone)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            config: ServerConfig {
                database_url: DEFAULT_DATABASE_URL.to_string(),
                jwt_secret: jwt_secret.into(),
                port: DEFAULT_PORT,
                token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
                bcrypt_cost: bcrypt::DEFAULT_COST,
                ai: None,
                auto_reply_delay: Duration::from_millis(DEFAULT_AUTO_REPLY_DELAY_MS),
                static_dir: DEFAULT_STATIC_DIR.to_string(),
            },
        }
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn token_ttl_days(mut self, days: i64) -> Self {
        self.config.token_ttl_days = days;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    pub fn ai(mut self, ai: AiConfig) -> Self {
        self.config.ai = Some(ai);
        self
    }

    pub fn auto_reply_delay(mut self, delay: Duration) -> Self {
        self.config.auto_reply_delay = delay;
        self
    }

    pub fn static_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.static_dir = dir.into();
        self
    }

    pub fn build(self) -> ServerConfig {
        self.config
    }
}

/// Create a SQLite connection pool
///
/// The database file is created if missing and foreign keys are enforced on
/// every connection, which the cascade rules depend on.
///
/// # Example
///
/// ```rust,no_run
/// use studentnest::backend::server::config::connect_database;
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let pool = connect_database("sqlite://studentnest.db").await?;
/// # Ok(())
/// # }
/// ```
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // In-memory databases live only as long as their single connection
    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options.connect_with(options).await.map_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
        e
    })?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Apply the embedded migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        e
    })?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
