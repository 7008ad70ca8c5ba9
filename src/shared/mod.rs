//! Shared Module
//!
//! This module contains the serializable domain types exchanged between the
//! backend and its clients: users, listings, favorites, reviews, messaging,
//! notifications, verification applications, dashboards and WebSocket frames.
//!
//! # Overview
//!
//! Types here carry no storage or HTTP concerns. Request types validate
//! themselves and report failures as `SharedError`.

/// User roles, verification states and profiles
pub mod user;

/// Property listings and search
pub mod listing;

/// Favorites
pub mod favorite;

/// Reviews
pub mod review;

/// Conversations and chat messages
pub mod messaging;

/// Notifications
pub mod notification;

/// Identity verification applications
pub mod verification;

/// Role-specific dashboards
pub mod dashboard;

/// WebSocket frames
pub mod event;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use event::{ClientFrame, OutgoingMessage, ServerFrame};
pub use user::{Role, VerificationStatus};
