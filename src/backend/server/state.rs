/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The SQLite connection pool
 * - Server configuration (secrets, TTLs, delays)
 * - The connection registry used by the WebSocket relay
 * - The optional hosted text generation client
 *
 * # Thread Safety
 *
 * Every field is cheap to clone and safe to share:
 * - `SqlitePool` and `reqwest::Client` are reference counted internally
 * - `ConnectionRegistry` wraps an `Arc<RwLock<HashMap<..>>>`
 * - `ServerConfig` is behind an `Arc`
 *
 * # Example
 *
 * ```rust
 * use studentnest::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let online = state.registry.get(uuid::Uuid::nil()).await.is_some();
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::ai::AiClient;
use crate::backend::error::BackendError;
use crate::backend::realtime::ConnectionRegistry;
use crate::backend::server::config::ServerConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,

    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Live WebSocket connections keyed by user ID
    ///
    /// Holds at most one connection per user. The relay, REST message
    /// handlers and notification helper all push through it.
    pub registry: ConnectionRegistry,

    /// Hosted text generation client
    ///
    /// `None` when no API key is configured.
    pub ai: Option<AiClient>,
}

impl AppState {
    /// Build state from a migrated pool and a configuration
    ///
    /// The AI client is created when the configuration carries AI settings.
    pub fn new(db_pool: SqlitePool, config: Arc<ServerConfig>) -> Self {
        let ai = config.ai.clone().map(AiClient::new);
        if ai.is_none() {
            tracing::warn!("AI_API_KEY not set. AI endpoints will answer 503.");
        }
        Self {
            db_pool,
            config,
            registry: ConnectionRegistry::new(),
            ai,
        }
    }

    /// Get the AI client or a 503 error
    pub fn ai_client(&self) -> Result<&AiClient, BackendError> {
        self.ai
            .as_ref()
            .ok_or_else(|| BackendError::service_unavailable("AI features are not configured"))
    }
}

/// Implement FromRef for SqlitePool
///
/// This allows Axum handlers to extract the pool directly
/// using `State(SqlitePool)`.
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

/// Implement FromRef for ConnectionRegistry
///
/// This allows Axum handlers to extract the registry directly
/// from `AppState`.
impl FromRef<AppState> for ConnectionRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}
