//! Messaging Module
//!
//! Student-landlord conversations about a property.
//!
//! - **`db`** - Conversation and message storage
//! - **`dispatch`** - Persist, relay and notify; shared by REST, the
//!   WebSocket relay and the AI reply endpoint
//! - **`handlers`** - `/api/conversations` endpoints

pub mod db;
pub mod dispatch;
pub mod handlers;

pub use dispatch::{post_message, publish_message, store_and_publish};
