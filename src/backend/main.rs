/**
 * StudentNest Server Entry Point
 *
 * This is the main entry point for the StudentNest backend server.
 * It loads configuration, prepares the database and serves the Axum app.
 */

use std::sync::Arc;

use studentnest::backend::server::{config, create_app, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("[STARTUP] Server initialization started");

    let server_config = ServerConfig::from_env()?;
    let pool = config::connect_database(&server_config.database_url).await?;
    config::run_migrations(&pool).await?;

    let port = server_config.port;
    let app = create_app(AppState::new(pool, Arc::new(server_config)));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
