//! Live, in-memory state of one room.
//!
//! ## Invariants
//!
//! - `present_users` holds at most one entry per `user_id`
//! - `chat_history` never holds more than [`CHAT_HISTORY_CAPACITY`] messages;
//!   the oldest message is evicted first

use std::collections::VecDeque;

use super::{
    entity::{ChatMessage, PresentUser, RoomSnapshot},
    value_object::{ConnectionId, RoomId, Timestamp},
};

/// Maximum number of chat messages retained per room.
pub const CHAT_HISTORY_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct RoomState {
    room_id: RoomId,
    /// Insertion ordered roster
    present_users: Vec<PresentUser>,
    document_content: String,
    chat_history: VecDeque<ChatMessage>,
    last_activity: Timestamp,
    /// Set when the room has been removed from its directory
    retired: bool,
}

impl RoomState {
    pub fn new(room_id: RoomId, created_at: Timestamp) -> Self {
        Self {
            room_id,
            present_users: Vec::new(),
            document_content: String::new(),
            chat_history: VecDeque::with_capacity(CHAT_HISTORY_CAPACITY),
            last_activity: created_at,
            retired: false,
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Insert `user`, first dropping any entry held by the same user or the
    /// same connection.
    ///
    /// Returns the replaced entry of the same user, which belongs to a stale
    /// connection when the user reconnected without leaving.
    pub fn upsert_user(&mut self, user: PresentUser) -> Option<PresentUser> {
        self.present_users.retain(|present| {
            present.connection_id != user.connection_id || present.user_id == user.user_id
        });
        let replaced = self
            .present_users
            .iter()
            .position(|present| present.user_id == user.user_id)
            .map(|index| self.present_users.remove(index));
        self.present_users.push(user);
        replaced
    }

    /// Remove the roster entry held by `connection_id`.
    ///
    /// Matching is by connection, so a newer connection of the same user is
    /// left untouched.
    pub fn remove_connection(&mut self, connection_id: &ConnectionId) -> Option<PresentUser> {
        let index = self
            .present_users
            .iter()
            .position(|present| &present.connection_id == connection_id)?;
        Some(self.present_users.remove(index))
    }

    pub fn is_present(&self, connection_id: &ConnectionId) -> bool {
        self.present_users
            .iter()
            .any(|present| &present.connection_id == connection_id)
    }

    pub fn present_users(&self) -> &[PresentUser] {
        &self.present_users
    }

    pub fn append_chat(&mut self, message: ChatMessage) {
        self.chat_history.push_back(message);
        while self.chat_history.len() > CHAT_HISTORY_CAPACITY {
            self.chat_history.pop_front();
        }
    }

    pub fn chat_history(&self) -> impl Iterator<Item = &ChatMessage> {
        self.chat_history.iter()
    }

    pub fn chat_len(&self) -> usize {
        self.chat_history.len()
    }

    /// Last-write-wins replacement of the shared document.
    pub fn set_document(&mut self, content: String) {
        self.document_content = content;
    }

    pub fn document_content(&self) -> &str {
        &self.document_content
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.room_id.clone(),
            document_content: self.document_content.clone(),
            chat_history: self.chat_history.iter().cloned().collect(),
            present_users: self.present_users.clone(),
        }
    }

    /// Connections that should receive a room broadcast.
    pub fn recipients(&self, exclude: Option<&ConnectionId>) -> Vec<ConnectionId> {
        self.present_users
            .iter()
            .map(|present| &present.connection_id)
            .filter(|connection_id| Some(*connection_id) != exclude)
            .cloned()
            .collect()
    }

    pub fn touch(&mut self, now: Timestamp) {
        if now > self.last_activity {
            self.last_activity = now;
        }
    }

    pub fn last_activity(&self) -> Timestamp {
        self.last_activity
    }

    /// Whether the room is empty and has seen no activity for `idle_timeout_millis`.
    pub fn is_idle(&self, now: Timestamp, idle_timeout_millis: u64) -> bool {
        self.present_users.is_empty() && now.millis_since(self.last_activity) >= idle_timeout_millis
    }

    pub(crate) fn retire(&mut self) {
        self.retired = true;
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }
}
