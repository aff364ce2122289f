//! Domain entities.

use super::value_object::{
    ConnectionId, Email, MessageId, RoomCode, RoomId, RoomName, Timestamp, UserId, Username,
};

/// Authenticated identity a connection acts as after joining a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: UserId,
    pub username: Username,
}

impl UserIdentity {
    pub fn new(user_id: UserId, username: Username) -> Self {
        Self { user_id, username }
    }
}

/// One entry of a room roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentUser {
    pub connection_id: ConnectionId,
    pub user_id: UserId,
    pub username: Username,
}

impl PresentUser {
    pub fn new(connection_id: ConnectionId, identity: UserIdentity) -> Self {
        Self {
            connection_id,
            user_id: identity.user_id,
            username: identity.username,
        }
    }
}

/// A chat message as stored in a room's history.
///
/// Identity fields always come from the server-side connection record,
/// never from the client payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub user_id: UserId,
    pub username: Username,
    pub text: String,
    pub timestamp: Timestamp,
}

/// Full room state handed to a connection right after it joins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub document_content: String,
    /// Chronological, oldest first
    pub chat_history: Vec<ChatMessage>,
    pub present_users: Vec<PresentUser>,
}

/// Durable room record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: RoomName,
    pub code: RoomCode,
    pub created_by: UserId,
    pub created_at: Timestamp,
    pub participants: Vec<UserId>,
}

impl Room {
    pub fn has_participant(&self, user_id: &UserId) -> bool {
        self.participants.contains(user_id)
    }
}

/// Durable user account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub password_hash: String,
    pub created_at: Timestamp,
}
