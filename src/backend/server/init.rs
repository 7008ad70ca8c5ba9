/**
 * Server Initialization
 *
 * This module handles the setup of the Axum application from an already
 * constructed `AppState`.
 *
 * # Initialization Process
 *
 * The binary performs these steps:
 * 1. Load `ServerConfig` from the environment
 * 2. Connect to SQLite and run migrations
 * 3. Build `AppState` (registry, optional AI client)
 * 4. Create and configure the router
 *
 * Tests skip step 1 and build the config with `ServerConfig::builder`.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_app(app_state: AppState) -> Router<()> {
    tracing::info!("Initializing StudentNest backend server");

    let app = create_router(app_state);

    tracing::info!("Router configured");

    app
}
