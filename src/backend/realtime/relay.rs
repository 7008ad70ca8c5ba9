/**
 * Relay Session
 *
 * Per-connection state machine driven by client frames.
 *
 * # States
 *
 * - `Unauthenticated` - Only an `auth` frame is acted on; everything else
 *   is dropped
 * - `Authenticated` - The connection is registered under its user and
 *   `message` frames are relayed
 *
 * A valid `auth` frame registers the connection, replacing (and closing)
 * any earlier connection of the same user. An invalid token leaves the
 * session unauthenticated.
 *
 * A `message` frame for a conversation that does not exist, or that the
 * sender does not take part in, is dropped without a reply. Accepted
 * messages go through the same dispatch as REST messages: persisted, pushed
 * to both participants, counterparty notified.
 */

use uuid::Uuid;

use super::registry::ConnectionHandle;
use crate::backend::messaging::{db as messaging_db, dispatch};
use crate::backend::middleware::authenticate;
use crate::backend::server::state::AppState;
use crate::shared::{ClientFrame, OutgoingMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Unauthenticated,
    Authenticated { user_id: Uuid },
}

pub struct RelaySession {
    state: AppState,
    handle: ConnectionHandle,
    phase: RelayState,
}

impl RelaySession {
    pub fn new(state: AppState, handle: ConnectionHandle) -> Self {
        Self {
            state,
            handle,
            phase: RelayState::Unauthenticated,
        }
    }

    pub fn phase(&self) -> RelayState {
        self.phase
    }

    pub fn user_id(&self) -> Option<Uuid> {
        match self.phase {
            RelayState::Authenticated { user_id } => Some(user_id),
            RelayState::Unauthenticated => None,
        }
    }

    /// Handle one text frame; unparseable frames are ignored
    pub async fn handle_text(&mut self, text: &str) {
        match ClientFrame::parse(text) {
            Ok(frame) => self.handle_frame(frame).await,
            Err(e) => tracing::debug!("[Relay] Ignoring frame on {}: {}", self.handle.conn_id(), e),
        }
    }

    pub async fn handle_frame(&mut self, frame: ClientFrame) {
        match (self.phase, frame) {
            (RelayState::Unauthenticated, ClientFrame::Auth { token }) => self.authenticate(&token).await,
            (RelayState::Unauthenticated, ClientFrame::Message { .. }) => {
                tracing::debug!("[Relay] Dropping message on unauthenticated connection {}", self.handle.conn_id());
            }
            (RelayState::Authenticated { user_id }, ClientFrame::Auth { .. }) => {
                tracing::debug!("[Relay] Connection of {} already authenticated", user_id);
            }
            (RelayState::Authenticated { user_id }, ClientFrame::Message { payload }) => {
                self.relay(user_id, payload).await;
            }
        }
    }

    async fn authenticate(&mut self, token: &str) {
        let user = match authenticate(&self.state, token).await {
            Ok(user) => user,
            Err(e) => {
                tracing::debug!("[Relay] Auth rejected on {}: {}", self.handle.conn_id(), e);
                return;
            }
        };

        if self.state.registry.register(user.user_id, self.handle.clone()).await.is_some() {
            tracing::info!("[Relay] Replaced earlier connection of {}", user.user_id);
        }
        self.phase = RelayState::Authenticated { user_id: user.user_id };
        tracing::info!("[Relay] {} authenticated on {}", user.user_id, self.handle.conn_id());
    }

    async fn relay(&self, sender_id: Uuid, payload: OutgoingMessage) {
        let conversation = match messaging_db::get_conversation(&self.state.db_pool, payload.conversation_id).await {
            Ok(Some(conversation)) => conversation,
            Ok(None) => {
                tracing::debug!("[Relay] Unknown conversation {}", payload.conversation_id);
                return;
            }
            Err(e) => {
                tracing::error!("[Relay] Failed to load conversation {}: {}", payload.conversation_id, e);
                return;
            }
        };

        if !conversation.has_participant(sender_id) {
            tracing::debug!("[Relay] {} is not in conversation {}", sender_id, conversation.id);
            return;
        }

        if let Err(e) = dispatch::post_message(&self.state, &conversation, sender_id, payload.content).await {
            tracing::warn!("[Relay] Message from {} not relayed: {}", sender_id, e);
        }
    }

    /// Remove this connection from the registry if it is still the current one
    pub async fn disconnect(self) {
        if let RelayState::Authenticated { user_id } = self.phase {
            let removed = self.state.registry.unregister(user_id, self.handle.conn_id()).await;
            tracing::info!("[Relay] {} disconnected (unregistered: {})", user_id, removed);
        }
    }
}
