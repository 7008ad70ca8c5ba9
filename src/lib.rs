//! StudentNest - Main Library
//!
//! StudentNest is a rental marketplace backend connecting students looking
//! for housing with landlords who list it, built on Axum and SQLite.
//!
//! # Overview
//!
//! This library provides the core functionality for StudentNest, including:
//! - Property listings with search, views, favorites and reviews
//! - Student/landlord conversations over REST and a WebSocket relay
//! - AI-assisted listing descriptions, review summaries and chat replies
//! - Notifications, identity verification and role-specific dashboards
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Serializable domain types
//!   - Users, listings, reviews, messages, notifications
//!   - WebSocket frames
//!   - Validation errors
//!
//! - **`backend`** - Server-side code
//!   - Axum router, middleware and handlers
//!   - SQLite persistence with migrations
//!   - Connection registry and relay
//!   - Hosted text generation client
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use studentnest::backend::server::{config::ServerConfig, create_app, AppState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let pool = studentnest::backend::server::config::connect_database(&config.database_url).await?;
//! studentnest::backend::server::config::run_migrations(&pool).await?;
//! let app = create_app(AppState::new(pool, Arc::new(config)));
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::error::SharedError` for validation of client payloads
//! - `backend::error::BackendError` for everything a handler can fail with,
//!   converted into a JSON response

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
