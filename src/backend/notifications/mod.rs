//! Notifications Module
//!
//! - **`db`** - Notification storage
//! - **`notify`** - Persist-and-push helper used by other features
//! - **`handlers`** - `/api/notifications` endpoints
//!
//! Notifications are created for new messages, favorites on a landlord's
//! listing, new reviews and verification decisions.

pub mod db;
pub mod handlers;
pub mod notify;

pub use notify::{notify, notify_or_log};
