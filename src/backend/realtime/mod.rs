//! Real-time Module
//!
//! Live delivery of chat messages and notifications over WebSockets.
//!
//! - **`registry`** - At most one live connection per user
//! - **`relay`** - Per-connection auth/relay state machine
//! - **`auto_reply`** - Scripted landlord reply to availability questions
//! - **`ws`** - The `/ws` upgrade handler and socket tasks
//!
//! # Frames
//!
//! Client to server: `auth`, `message`. Server to client: `newMessage`,
//! `newNotification`. See `shared::event`.
//!
//! Delivery is best-effort: a frame for a user without a live connection is
//! dropped. Messages and notifications are persisted first, so clients catch
//! up over REST.

pub mod auto_reply;
pub mod registry;
pub mod relay;
pub mod ws;

pub use registry::{ConnectionHandle, ConnectionRegistry, Outbound};
pub use relay::{RelaySession, RelayState};
pub use ws::ws_handler;
