//! Conversion logic between DTOs and domain types.

use studysphere_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::{ChatMessage, PresentUser, Room, RoomEvent, RoomSnapshot, UserAccount},
    infrastructure::dto::{http, websocket as dto},
    usecase::{AuthSession, JoinUser},
};

// ========================================
// DTO → Domain
// ========================================

impl From<dto::JoinUserDto> for JoinUser {
    fn from(dto: dto::JoinUserDto) -> Self {
        Self {
            id: dto.id,
            username: dto.username,
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<PresentUser> for dto::PresentUserDto {
    fn from(model: PresentUser) -> Self {
        Self {
            connection_id: model.connection_id.into_string(),
            user_id: model.user_id.into_string(),
            username: model.username.into_string(),
        }
    }
}

impl From<ChatMessage> for dto::ChatMessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            id: model.id.into_string(),
            user_id: model.user_id.into_string(),
            username: model.username.into_string(),
            message: model.text,
            timestamp: timestamp_to_rfc3339(model.timestamp.value()),
        }
    }
}

fn users_to_dto(users: Vec<PresentUser>) -> Vec<dto::PresentUserDto> {
    users.into_iter().map(Into::into).collect()
}

impl From<RoomEvent> for dto::ServerEvent {
    fn from(event: RoomEvent) -> Self {
        match event {
            RoomEvent::RoomState(snapshot) => dto::ServerEvent::RoomState {
                notes_content: snapshot.document_content,
                chat_messages: snapshot.chat_history.into_iter().map(Into::into).collect(),
                users: users_to_dto(snapshot.present_users),
            },
            RoomEvent::UserJoined { username, users } => dto::ServerEvent::UserJoined {
                username: username.into_string(),
                users: users_to_dto(users),
            },
            RoomEvent::ChatMessage(message) => dto::ServerEvent::ChatMessage(message.into()),
            RoomEvent::NotesUpdated { content } => dto::ServerEvent::NotesUpdated { content },
            RoomEvent::DrawingUpdate(payload) => dto::ServerEvent::DrawingUpdate { data: payload.0 },
            RoomEvent::UserLeft { username, users } => dto::ServerEvent::UserLeft {
                username: username.into_string(),
                users: users_to_dto(users),
            },
        }
    }
}

impl From<RoomSnapshot> for http::RoomSnapshotDto {
    fn from(snapshot: RoomSnapshot) -> Self {
        Self {
            room_id: snapshot.room_id.into_string(),
            notes_content: snapshot.document_content,
            chat_messages: snapshot.chat_history.into_iter().map(Into::into).collect(),
            users: users_to_dto(snapshot.present_users),
        }
    }
}

impl From<UserAccount> for http::UserDto {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id.into_string(),
            username: account.username.into_string(),
            email: account.email.as_str().to_string(),
        }
    }
}

impl From<AuthSession> for http::TokenResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            access_token: session.token,
            token_type: "bearer".to_string(),
            user: session.user.into(),
        }
    }
}

impl From<Room> for http::RoomDto {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.into_string(),
            name: room.name.into_string(),
            room_code: room.code.into(),
            created_by: room.created_by.into_string(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
            participants: room
                .participants
                .into_iter()
                .map(|id| id.into_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ConnectionId, DrawingPayload, Email, MessageId, RoomCode, RoomId, RoomName, Timestamp,
        UserId, Username,
    };

    fn alice_present() -> PresentUser {
        PresentUser {
            connection_id: ConnectionId::new("c1".to_string()).unwrap(),
            user_id: UserId::new("u1".to_string()).unwrap(),
            username: Username::new("alice".to_string()).unwrap(),
        }
    }

    #[test]
    fn test_chat_message_to_dto_renders_rfc3339_timestamp() {
        // テスト項目: チャットメッセージの時刻は RFC 3339 (UTC) 文字列に変換される
        // given (前提条件):
        let message = ChatMessage {
            id: MessageId::new("m1".to_string()).unwrap(),
            user_id: UserId::new("u1".to_string()).unwrap(),
            username: Username::new("alice".to_string()).unwrap(),
            text: "hello".to_string(),
            timestamp: Timestamp::new(1_672_531_200_123),
        };

        // when (操作):
        let dto: dto::ChatMessageDto = message.into();

        // then (期待する結果):
        assert_eq!(dto.message, "hello");
        assert_eq!(dto.timestamp, "2023-01-01T00:00:00.123Z");
    }

    #[test]
    fn test_room_state_event_maps_snapshot_fields() {
        // テスト項目: スナップショットは notes_content / chat_messages / users に対応付けられる
        // given (前提条件):
        let snapshot = RoomSnapshot {
            room_id: RoomId::new("R1".to_string()).unwrap(),
            document_content: "notes".to_string(),
            chat_history: vec![],
            present_users: vec![alice_present()],
        };

        // when (操作):
        let event: dto::ServerEvent = RoomEvent::RoomState(snapshot).into();

        // then (期待する結果):
        assert_eq!(
            event,
            dto::ServerEvent::RoomState {
                notes_content: "notes".to_string(),
                chat_messages: vec![],
                users: vec![dto::PresentUserDto {
                    connection_id: "c1".to_string(),
                    user_id: "u1".to_string(),
                    username: "alice".to_string(),
                }],
            }
        );
    }

    #[test]
    fn test_drawing_payload_is_passed_through_verbatim() {
        let data = serde_json::json!({"tool": "pen", "points": [1, 2, 3]});

        let event: dto::ServerEvent = RoomEvent::DrawingUpdate(DrawingPayload(data.clone())).into();

        assert_eq!(event, dto::ServerEvent::DrawingUpdate { data });
    }

    #[test]
    fn test_room_to_dto() {
        let room = Room {
            id: RoomId::new("room-1".to_string()).unwrap(),
            name: RoomName::new("Algebra".to_string()).unwrap(),
            code: RoomCode::new("ABC123".to_string()).unwrap(),
            created_by: UserId::new("u1".to_string()).unwrap(),
            created_at: Timestamp::new(0),
            participants: vec![UserId::new("u1".to_string()).unwrap()],
        };

        let dto: http::RoomDto = room.into();

        assert_eq!(dto.room_code, "ABC123");
        assert_eq!(dto.created_at, "1970-01-01T00:00:00.000Z");
        assert_eq!(dto.participants, vec!["u1".to_string()]);
    }

    #[test]
    fn test_auth_session_to_token_response() {
        let session = AuthSession {
            token: "jwt".to_string(),
            user: UserAccount {
                id: UserId::new("u1".to_string()).unwrap(),
                username: Username::new("alice".to_string()).unwrap(),
                email: Email::new("alice@example.com".to_string()).unwrap(),
                password_hash: "secret-hash".to_string(),
                created_at: Timestamp::new(0),
            },
        };

        let response: http::TokenResponse = session.into();

        assert_eq!(response.token_type, "bearer");
        assert_eq!(response.user.email, "alice@example.com");
        // パスワードハッシュは公開ビューに含まれない
        let value = serde_json::to_value(&response).unwrap();
        assert!(!value.to_string().contains("secret-hash"));
    }
}
