//! WebSocket event DTOs.
//!
//! Every frame is a JSON object whose `type` field selects the event.

use serde::{Deserialize, Serialize};

/// `user` field of a `join_room` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinUserDto {
    pub id: String,
    pub username: String,
}

/// Events sent by clients
///
/// Fields the session core validates itself are optional here so that a
/// missing value reaches it instead of failing the whole frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinRoom {
        room_id: Option<String>,
        user: Option<JoinUserDto>,
    },
    /// `room_id` is accepted for compatibility; the server uses the room
    /// the connection joined
    SendChatMessage {
        room_id: Option<String>,
        message: String,
    },
    UpdateNotes {
        room_id: Option<String>,
        content: String,
    },
    DrawingData {
        room_id: Option<String>,
        #[serde(default)]
        data: serde_json::Value,
    },
    LeaveRoom {
        room_id: Option<String>,
    },
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::JoinRoom { .. } => "join_room",
            ClientEvent::SendChatMessage { .. } => "send_chat_message",
            ClientEvent::UpdateNotes { .. } => "update_notes",
            ClientEvent::DrawingData { .. } => "drawing_data",
            ClientEvent::LeaveRoom { .. } => "leave_room",
        }
    }
}

/// One roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentUserDto {
    #[serde(rename = "socket_id")]
    pub connection_id: String,
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub message: String,
    /// RFC 3339, UTC
    pub timestamp: String,
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    RoomState {
        notes_content: String,
        chat_messages: Vec<ChatMessageDto>,
        users: Vec<PresentUserDto>,
    },
    UserJoined {
        username: String,
        users: Vec<PresentUserDto>,
    },
    ChatMessage(ChatMessageDto),
    NotesUpdated {
        content: String,
    },
    DrawingUpdate {
        data: serde_json::Value,
    },
    UserLeft {
        username: String,
        users: Vec<PresentUserDto>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_events_parse_from_wire_format() {
        // テスト項目: クライアントが送る各イベントが type で判別されて読み込まれる
        // given (前提条件):
        let frames = [
            json!({"type": "join_room", "room_id": "R1", "user": {"id": "u1", "username": "alice"}}),
            json!({"type": "send_chat_message", "room_id": "R1", "message": "hi"}),
            json!({"type": "update_notes", "room_id": "R1", "content": "# notes"}),
            json!({"type": "drawing_data", "room_id": "R1", "data": {"points": [[0, 0], [1, 1]]}}),
            json!({"type": "leave_room"}),
        ];

        // when (操作):
        let events: Vec<ClientEvent> = frames
            .into_iter()
            .map(|frame| serde_json::from_value(frame).unwrap())
            .collect();

        // then (期待する結果):
        assert_eq!(
            events[0],
            ClientEvent::JoinRoom {
                room_id: Some("R1".to_string()),
                user: Some(JoinUserDto {
                    id: "u1".to_string(),
                    username: "alice".to_string(),
                }),
            }
        );
        assert_eq!(
            events[3],
            ClientEvent::DrawingData {
                room_id: Some("R1".to_string()),
                data: json!({"points": [[0, 0], [1, 1]]}),
            }
        );
        assert_eq!(events[4], ClientEvent::LeaveRoom { room_id: None });
    }

    #[test]
    fn test_join_room_without_user_still_parses() {
        // テスト項目: user が欠けた join_room もパースでき、検証はセッション側に委ねられる
        let event: ClientEvent =
            serde_json::from_str(r#"{"type":"join_room","room_id":"R1"}"#).unwrap();

        assert_eq!(
            event,
            ClientEvent::JoinRoom {
                room_id: Some("R1".to_string()),
                user: None,
            }
        );
    }

    #[test]
    fn test_unknown_or_malformed_client_events_are_rejected() {
        // テスト項目: 未知の type や必須フィールド欠落はパースエラーになる
        assert!(serde_json::from_str::<ClientEvent>(r#"{"type":"shout","text":"hi"}"#).is_err());
        assert!(serde_json::from_str::<ClientEvent>(r#"{"type":"send_chat_message"}"#).is_err());
        assert!(serde_json::from_str::<ClientEvent>(r#"{"message":"no type"}"#).is_err());
        assert!(serde_json::from_str::<ClientEvent>("not json").is_err());
    }

    #[test]
    fn test_server_event_serializes_with_type_tag() {
        // テスト項目: サーバーイベントは type タグ付きのフラットな JSON になる
        // given (前提条件):
        let event = ServerEvent::ChatMessage(ChatMessageDto {
            id: "m1".to_string(),
            user_id: "u1".to_string(),
            username: "alice".to_string(),
            message: "hi".to_string(),
            timestamp: "2023-01-01T00:00:00.000Z".to_string(),
        });

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "type": "chat_message",
                "id": "m1",
                "user_id": "u1",
                "username": "alice",
                "message": "hi",
                "timestamp": "2023-01-01T00:00:00.000Z"
            })
        );
    }

    #[test]
    fn test_room_state_field_names() {
        let event = ServerEvent::RoomState {
            notes_content: "doc".to_string(),
            chat_messages: vec![],
            users: vec![PresentUserDto {
                connection_id: "c1".to_string(),
                user_id: "u1".to_string(),
                username: "alice".to_string(),
            }],
        };

        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "room_state",
                "notes_content": "doc",
                "chat_messages": [],
                "users": [{"socket_id": "c1", "user_id": "u1", "username": "alice"}]
            })
        );
    }
}
