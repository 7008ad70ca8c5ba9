//! Backend Module
//!
//! This module contains all server-side code for the StudentNest application.
//! It provides an Axum HTTP server with a WebSocket relay, SQLite persistence
//! and a hosted text-generation integration.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`middleware`** - Bearer-token authentication
//! - **`error`** - Backend-specific error types
//! - **`auth`** - Accounts, JWT sessions, signup/login
//! - **`users`** - Profiles, password changes, account deletion
//! - **`listings`** - Property CRUD, search and view tracking
//! - **`favorites`** - Saved properties
//! - **`reviews`** - Ratings and comments
//! - **`messaging`** - Conversations and messages over REST
//! - **`notifications`** - Persisted notifications with live push
//! - **`realtime`** - Connection registry, relay session and `/ws`
//! - **`ai`** - Text generation client and AI endpoints
//! - **`verification`** - Identity verification and admin review
//! - **`dashboard`** - Role-specific aggregates
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── middleware/     - Request middleware
//! ├── error/          - Error types
//! ├── auth/           - Authentication
//! ├── users/          - Account management
//! ├── listings/       - Properties
//! ├── favorites/      - Favorites
//! ├── reviews/        - Reviews
//! ├── messaging/      - Conversations
//! ├── notifications/  - Notifications
//! ├── realtime/       - WebSocket relay
//! ├── ai/             - Text generation
//! ├── verification/   - Verification
//! └── dashboard/      - Dashboards
//! ```
//!
//! # Thread Safety
//!
//! - `SqlitePool` is cloned into every handler
//! - The connection registry is `Arc<RwLock<HashMap<..>>>`
//! - Each WebSocket gets a writer task fed by an unbounded channel

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Profile and account management
pub mod users;

/// Property listings
pub mod listings;

/// Favorites
pub mod favorites;

/// Reviews
pub mod reviews;

/// Conversations and messages
pub mod messaging;

/// Notifications
pub mod notifications;

/// Real-time relay
pub mod realtime;

/// Hosted text generation
pub mod ai;

/// Identity verification
pub mod verification;

/// Dashboards
pub mod dashboard;


/// Re-export commonly used types
pub use server::{create_app, AppState};
pub use error::BackendError;
pub use realtime::ConnectionRegistry;
