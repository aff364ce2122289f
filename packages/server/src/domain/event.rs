//! Outbound events produced by the session core.
//!
//! These are transport-agnostic; the WebSocket layer maps them onto its wire
//! format.

use super::{
    entity::{ChatMessage, PresentUser, RoomSnapshot},
    value_object::Username,
};

/// Opaque drawing payload. It is relayed verbatim and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingPayload(pub serde_json::Value);

#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// Unicast to a connection that just joined
    RoomState(RoomSnapshot),
    UserJoined {
        username: Username,
        users: Vec<PresentUser>,
    },
    ChatMessage(ChatMessage),
    NotesUpdated {
        content: String,
    },
    DrawingUpdate(DrawingPayload),
    UserLeft {
        username: Username,
        users: Vec<PresentUser>,
    },
}

impl RoomEvent {
    /// Event name used for logging
    pub fn name(&self) -> &'static str {
        match self {
            RoomEvent::RoomState(_) => "room_state",
            RoomEvent::UserJoined { .. } => "user_joined",
            RoomEvent::ChatMessage(_) => "chat_message",
            RoomEvent::NotesUpdated { .. } => "notes_updated",
            RoomEvent::DrawingUpdate(_) => "drawing_update",
            RoomEvent::UserLeft { .. } => "user_left",
        }
    }
}
