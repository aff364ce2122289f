//! UseCase: live session coordination
//!
//! The coordinator is the only component that touches both the connection
//! registry and the room directory, and the only one that calls the
//! transport.
//!
//! ## Connection lifecycle
//!
//! ```text
//! Connected --join--> Joined(room) --leave--> Connected
//!     |                   |
//!     +---disconnect------+--disconnect--> Disconnected
//! ```
//!
//! ## Ordering
//!
//! Every mutation of a room and the fan-out it triggers happen while the
//! room's lock is held, so members observe a room's events in the order they
//! were applied. The registry lock is never held while a room lock is being
//! acquired from inside it, and never across a send.

use std::{fmt, str::FromStr, sync::Arc, time::Duration};

use tokio::sync::Mutex;

use studysphere_shared::time::Clock;

use crate::domain::{
    BroadcastChannel, ChatMessage, ConnectionId, ConnectionRegistry, DrawingPayload, MessageId,
    PresentUser, PusherChannel, RoomDirectory, RoomEvent, RoomId, RoomSnapshot, Timestamp,
    UserId, UserIdentity, Username,
};

use super::error::SessionError;

/// What to do with drawing events from connections that have not joined a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingRelayPolicy {
    /// Relay to the room named in the event payload
    #[default]
    Permissive,
    /// Drop the event
    MembersOnly,
}

impl FromStr for DrawingRelayPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "permissive" => Ok(Self::Permissive),
            "members-only" | "members_only" => Ok(Self::MembersOnly),
            other => Err(format!(
                "unknown drawing relay policy '{other}' (expected 'permissive' or 'members-only')"
            )),
        }
    }
}

impl fmt::Display for DrawingRelayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permissive => f.write_str("permissive"),
            Self::MembersOnly => f.write_str("members-only"),
        }
    }
}

/// Identity fields of a join request as received from the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinUser {
    pub id: String,
    pub username: String,
}

pub struct SessionCoordinator {
    registry: Mutex<ConnectionRegistry>,
    directory: RoomDirectory,
    channel: Arc<dyn BroadcastChannel>,
    clock: Arc<dyn Clock>,
    drawing_relay: DrawingRelayPolicy,
}

impl SessionCoordinator {
    pub fn new(
        channel: Arc<dyn BroadcastChannel>,
        clock: Arc<dyn Clock>,
        drawing_relay: DrawingRelayPolicy,
    ) -> Self {
        Self {
            registry: Mutex::new(ConnectionRegistry::new()),
            directory: RoomDirectory::new(),
            channel,
            clock,
            drawing_relay,
        }
    }

    /// Register a freshly accepted connection. Nothing is broadcast.
    pub async fn on_connect(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.registry.lock().await.register(connection_id.clone());
        self.channel
            .register_connection(connection_id.clone(), sender)
            .await;
        tracing::info!("Connection '{}' registered", connection_id);
    }

    /// Join `connection_id` to a room.
    ///
    /// The joiner receives a `room_state` snapshot that already lists it, then
    /// every member (joiner included) receives `user_joined`.
    ///
    /// # Errors
    ///
    /// * `InvalidJoin` - room id or user missing or blank; nothing is mutated
    /// * `UnknownConnection` - the connection was never registered
    pub async fn on_join(
        &self,
        connection_id: &ConnectionId,
        room_id: Option<String>,
        user: Option<JoinUser>,
    ) -> Result<(), SessionError> {
        let (room_id, identity) = validate_join(room_id, user)?;

        let previous = {
            let registry = self.registry.lock().await;
            registry
                .lookup(connection_id)
                .ok_or_else(|| SessionError::UnknownConnection(connection_id.clone()))?
                .membership()
                .map(|(room, who)| (room.clone(), who.clone()))
        };
        if let Some((previous_room, previous_identity)) = previous
            && (previous_room != room_id || previous_identity != identity)
        {
            tracing::info!(
                "Connection '{}' rejoins as '{}' in room '{}' (was '{}' in room '{}')",
                connection_id,
                identity.username,
                room_id,
                previous_identity.username,
                previous_room
            );
            self.on_leave(connection_id).await;
        }

        self.registry
            .lock()
            .await
            .attach(connection_id, identity.clone(), room_id.clone())
            .map_err(|_| SessionError::UnknownConnection(connection_id.clone()))?;

        let now = self.now();
        let mut room = self.directory.lock_or_create(&room_id, now).await;
        room.touch(now);

        let username = identity.username.clone();
        if let Some(replaced) = room.upsert_user(PresentUser::new(connection_id.clone(), identity))
            && &replaced.connection_id != connection_id
        {
            tracing::info!(
                "User '{}' rejoined room '{}', replacing stale connection '{}'",
                replaced.user_id,
                room_id,
                replaced.connection_id
            );
        }

        self.push(connection_id, &RoomEvent::RoomState(room.snapshot()))
            .await;

        let joined = RoomEvent::UserJoined {
            username: username.clone(),
            users: room.present_users().to_vec(),
        };
        self.broadcast(&room.recipients(None), &joined).await;

        tracing::info!(
            "'{}' joined room '{}' on connection '{}' ({} present)",
            username,
            room_id,
            connection_id,
            room.present_users().len()
        );
        Ok(())
    }

    /// Append a chat message and broadcast it to the whole room, sender
    /// included. Dropped when the connection has not joined a room.
    pub async fn on_chat_message(&self, connection_id: &ConnectionId, text: String) {
        let Some((room_id, identity)) = self.membership(connection_id).await else {
            tracing::debug!(
                "Dropping chat message from connection '{}' outside any room",
                connection_id
            );
            return;
        };
        let Some(mut room) = self.directory.lock(&room_id).await else {
            tracing::debug!("Dropping chat message for vanished room '{}'", room_id);
            return;
        };

        let now = self.now();
        let message = ChatMessage {
            id: MessageId::generate(),
            user_id: identity.user_id,
            username: identity.username,
            text,
            timestamp: now,
        };
        room.append_chat(message.clone());
        room.touch(now);

        tracing::debug!(
            "Chat message '{}' from '{}' in room '{}'",
            message.id,
            message.username,
            room_id
        );
        self.broadcast(&room.recipients(None), &RoomEvent::ChatMessage(message))
            .await;
    }

    /// Overwrite the shared document and broadcast it to everyone but the
    /// sender. Dropped when the connection has not joined a room.
    pub async fn on_document_update(&self, connection_id: &ConnectionId, content: String) {
        let Some((room_id, _)) = self.membership(connection_id).await else {
            tracing::debug!(
                "Dropping notes update from connection '{}' outside any room",
                connection_id
            );
            return;
        };
        let Some(mut room) = self.directory.lock(&room_id).await else {
            tracing::debug!("Dropping notes update for vanished room '{}'", room_id);
            return;
        };

        room.set_document(content.clone());
        room.touch(self.now());

        self.broadcast(
            &room.recipients(Some(connection_id)),
            &RoomEvent::NotesUpdated { content },
        )
        .await;
    }

    /// Relay a drawing payload to everyone in the room but the sender.
    ///
    /// The payload is never stored. A connection without a room falls back
    /// to `room_id` from the payload unless the policy is `MembersOnly`.
    pub async fn on_drawing_event(
        &self,
        connection_id: &ConnectionId,
        room_id: Option<String>,
        payload: DrawingPayload,
    ) {
        let target = match self.membership(connection_id).await {
            Some((joined_room, _)) => joined_room,
            None => match self.drawing_relay {
                DrawingRelayPolicy::MembersOnly => {
                    tracing::debug!(
                        "Dropping drawing event from connection '{}' outside any room",
                        connection_id
                    );
                    return;
                }
                DrawingRelayPolicy::Permissive => match room_id.map(RoomId::new) {
                    Some(Ok(room_id)) => room_id,
                    _ => {
                        tracing::debug!(
                            "Dropping drawing event from connection '{}' without a room id",
                            connection_id
                        );
                        return;
                    }
                },
            },
        };
        let Some(mut room) = self.directory.lock(&target).await else {
            tracing::debug!("Dropping drawing event for unknown room '{}'", target);
            return;
        };

        room.touch(self.now());
        self.broadcast(
            &room.recipients(Some(connection_id)),
            &RoomEvent::DrawingUpdate(payload),
        )
        .await;
    }

    /// Leave the current room without closing the connection.
    pub async fn on_leave(&self, connection_id: &ConnectionId) {
        let detached = self.registry.lock().await.detach(connection_id);
        match detached {
            Some((room_id, identity)) => {
                self.depart(connection_id, &room_id, identity.username)
                    .await;
            }
            None => tracing::debug!("Connection '{}' is not in a room", connection_id),
        }
    }

    /// Tear down a connection. Calling it again for the same connection is a
    /// no-op.
    pub async fn on_disconnect(&self, connection_id: &ConnectionId) {
        let Some(entry) = self.registry.lock().await.remove(connection_id) else {
            tracing::debug!("Connection '{}' already removed", connection_id);
            return;
        };
        self.channel.unregister_connection(connection_id).await;

        if let Some((room_id, identity)) = entry.membership() {
            self.depart(connection_id, room_id, identity.username.clone())
                .await;
        }
        tracing::info!("Connection '{}' disconnected", connection_id);
    }

    /// Current state of a live room
    pub async fn room_snapshot(&self, room_id: &RoomId) -> Option<RoomSnapshot> {
        let room = self.directory.lock(room_id).await?;
        Some(room.snapshot())
    }

    /// Remove rooms that have been empty for at least `idle_timeout`.
    pub async fn reap_idle_rooms(&self, idle_timeout: Duration) -> Vec<RoomId> {
        self.directory.reap_idle(self.now(), idle_timeout).await
    }

    pub async fn connection_count(&self) -> usize {
        self.registry.lock().await.len()
    }

    pub async fn room_count(&self) -> usize {
        self.directory.len().await
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    async fn membership(&self, connection_id: &ConnectionId) -> Option<(RoomId, UserIdentity)> {
        let registry = self.registry.lock().await;
        let (room_id, identity) = registry.lookup(connection_id)?.membership()?;
        Some((room_id.clone(), identity.clone()))
    }

    /// Remove the roster entry of `connection_id` and tell the remaining
    /// members. Nothing is sent when the entry was already replaced by a
    /// newer connection of the same user.
    async fn depart(&self, connection_id: &ConnectionId, room_id: &RoomId, username: Username) {
        let Some(mut room) = self.directory.lock(room_id).await else {
            return;
        };
        if room.remove_connection(connection_id).is_none() {
            tracing::debug!(
                "Connection '{}' was no longer present in room '{}'",
                connection_id,
                room_id
            );
            return;
        }
        room.touch(self.now());

        let left = RoomEvent::UserLeft {
            username: username.clone(),
            users: room.present_users().to_vec(),
        };
        self.broadcast(&room.recipients(None), &left).await;
        tracing::info!(
            "'{}' left room '{}' ({} present)",
            username,
            room_id,
            room.present_users().len()
        );
    }

    async fn push(&self, connection_id: &ConnectionId, event: &RoomEvent) {
        if let Err(e) = self.channel.push_to(connection_id, event).await {
            tracing::warn!(
                "Failed to push {} to connection '{}': {}",
                event.name(),
                connection_id,
                e
            );
        }
    }

    async fn broadcast(&self, targets: &[ConnectionId], event: &RoomEvent) {
        if targets.is_empty() {
            return;
        }
        if let Err(e) = self.channel.broadcast(targets, event).await {
            tracing::warn!("Failed to broadcast {}: {}", event.name(), e);
        }
    }
}

fn validate_join(
    room_id: Option<String>,
    user: Option<JoinUser>,
) -> Result<(RoomId, UserIdentity), SessionError> {
    let room_id = room_id.ok_or_else(|| SessionError::InvalidJoin("missing room_id".to_string()))?;
    let user = user.ok_or_else(|| SessionError::InvalidJoin("missing user".to_string()))?;

    let room_id = RoomId::new(room_id)?;
    let identity = UserIdentity::new(UserId::new(user.id)?, Username::new(user.username)?);
    Ok((room_id, identity))
}
