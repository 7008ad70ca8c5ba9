//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Architecture
//!
//! The server module is organized into focused submodules:
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Configuration loading, database connection and migrations
//! - **`init`** - App creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - ServerConfig, SQLite pool, migrations
//! └── init.rs         - App creation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use studentnest::backend::server::{config, create_app, AppState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = config::ServerConfig::builder("secret")
//!     .database_url("sqlite::memory:")
//!     .build();
//! let pool = config::connect_database(&cfg.database_url).await?;
//! config::run_migrations(&pool).await?;
//! let app = create_app(AppState::new(pool, Arc::new(cfg)));
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{ConfigError, ServerConfig};
pub use init::create_app;
pub use state::AppState;
