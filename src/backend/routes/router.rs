/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Infrastructure routes (`/health`, `/ws`)
 * 2. Public API routes
 * 3. Protected API routes (behind `auth_middleware`)
 * 4. Fallback: the single-page client from `STATIC_DIR`
 *
 * Public and protected routers may share a path with different methods
 * (`GET /api/properties` is public, `POST /api/properties` is not); they
 * are merged per method.
 */

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::backend::realtime::ws_handler;
use crate::backend::routes::api_routes::{configure_public_routes, protected_routes};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state shared by every handler
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/ws", get(ws_handler));

    let router = configure_public_routes(router);
    let router = router.merge(protected_routes(app_state.clone()));

    // Unknown paths fall through to the client build; client-side routes get index.html
    let static_dir = Path::new(&app_state.config.static_dir);
    let client = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    router
        .fallback_service(client)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
