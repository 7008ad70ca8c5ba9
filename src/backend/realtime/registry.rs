/**
 * Connection Registry
 *
 * Tracks the live WebSocket connection of each authenticated user and routes
 * server frames to them.
 *
 * # Contract
 *
 * - At most one connection is tracked per user ID
 * - Registering a new connection closes the one it replaces
 * - Unregistering only removes the entry if it still belongs to the caller's
 *   connection, so a superseded socket shutting down late cannot evict its
 *   successor
 * - Nothing is persisted: frames for users without a connection are dropped
 *
 * Each connection is represented by the sending half of an unbounded channel
 * drained by that socket's writer task.
 */

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::shared::ServerFrame;

/// Instruction for a socket writer task
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Serialize and send a frame
    Frame(ServerFrame),
    /// Send a close frame and stop
    Close,
}

pub type ConnectionSender = mpsc::UnboundedSender<Outbound>;

/// Handle to one live connection
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    conn_id: Uuid,
    sender: ConnectionSender,
}

impl ConnectionHandle {
    pub fn new(sender: ConnectionSender) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            sender,
        }
    }

    /// Create a handle together with the receiver its writer task drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn conn_id(&self) -> Uuid {
        self.conn_id
    }

    /// Queue a frame; false if the writer task has gone away
    pub fn send(&self, frame: ServerFrame) -> bool {
        self.sender.send(Outbound::Frame(frame)).is_ok()
    }

    /// Ask the writer task to close the socket
    pub fn close(&self) {
        let _ = self.sender.send(Outbound::Close);
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Live connections keyed by user ID
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<RwLock<HashMap<Uuid, ConnectionHandle>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection for a user
    ///
    /// Any connection previously registered for the same user is closed and
    /// returned.
    pub async fn register(&self, user_id: Uuid, handle: ConnectionHandle) -> Option<ConnectionHandle> {
        let previous = {
            let mut connections = self.connections.write().await;
            connections.insert(user_id, handle)
        };

        if let Some(old) = &previous {
            tracing::info!("[Relay] Closing superseded connection {} for user {}", old.conn_id, user_id);
            old.close();
        }
        tracing::debug!("[Relay] User {} registered", user_id);
        previous
    }

    /// Remove a user's connection if it is still the given one
    ///
    /// # Returns
    /// True if an entry was removed
    pub async fn unregister(&self, user_id: Uuid, conn_id: Uuid) -> bool {
        let mut connections = self.connections.write().await;
        match connections.get(&user_id) {
            Some(current) if current.conn_id == conn_id => {
                connections.remove(&user_id);
                tracing::debug!("[Relay] User {} unregistered", user_id);
                true
            }
            _ => false,
        }
    }

    pub async fn get(&self, user_id: Uuid) -> Option<ConnectionHandle> {
        self.connections.read().await.get(&user_id).cloned()
    }

    /// Push a frame to one user if connected
    pub async fn send_to(&self, user_id: Uuid, frame: ServerFrame) -> bool {
        let connections = self.connections.read().await;
        match connections.get(&user_id) {
            Some(handle) => handle.send(frame),
            None => false,
        }
    }

    /// Push a frame to each listed user that is connected
    ///
    /// # Returns
    ///
    /// Number of connections the frame was queued on (0 if nobody is online)
    pub async fn deliver(&self, user_ids: &[Uuid], frame: &ServerFrame) -> usize {
        let connections = self.connections.read().await;
        let mut delivered = 0;
        for (i, user_id) in user_ids.iter().enumerate() {
            if user_ids[..i].contains(user_id) {
                continue;
            }
            if let Some(handle) = connections.get(user_id) {
                if handle.send(frame.clone()) {
                    delivered += 1;
                }
            }
        }
        tracing::debug!("[Relay] Frame delivered to {} connections", delivered);
        delivered
    }
}
