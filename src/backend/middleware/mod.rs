//! Middleware Module
//!
//! This module contains all HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer-token authentication and the `AuthUser` /
//!   `OptionalAuthUser` extractors
//!
//! # Example
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/api/favorites", get(list_favorites))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, authenticate, bearer_token, AuthUser, AuthenticatedUser, OptionalAuthUser};
