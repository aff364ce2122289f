//! WebSocket connection handlers.
//!
//! Each connection runs two tasks: a reader that decodes client events and
//! hands them to the session coordinator, and a writer (`pusher_loop`) that
//! drains the connection's outbound queue into the socket. When either task
//! ends the other is aborted and the connection is torn down.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, DrawingPayload},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
    usecase::{SessionCoordinator, SessionError},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionId::generate();
    tracing::debug!("Upgrading connection '{}'", connection_id);
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that drains `rx` into the WebSocket sink.
///
/// Frames queued by the session coordinator for this connection are written
/// in order. The task ends when the queue closes or the socket write fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();
    state.session.on_connect(connection_id.clone(), tx).await;

    let session = state.session.clone();
    let reader_connection_id = connection_id.clone();

    // Spawn a task to receive events from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", reader_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch(&session, &reader_connection_id, text.as_str()).await;
                }
                Message::Binary(_) => {
                    tracing::debug!(
                        "Ignoring binary frame from '{}'",
                        reader_connection_id
                    );
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", reader_connection_id);
                    break;
                }
                // Ping/pong is handled by the WebSocket protocol layer
                _ => {}
            }
        }
    });

    // Spawn a task to push queued events to this connection
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.session.on_disconnect(&connection_id).await;
}

/// Decode one text frame and route it to the session coordinator.
///
/// Malformed frames and unknown event types are logged and dropped; they
/// never close the connection.
async fn dispatch(session: &SessionCoordinator, connection_id: &ConnectionId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Dropping malformed frame from '{}': {}", connection_id, e);
            return;
        }
    };
    tracing::debug!("Received {} from '{}'", event.name(), connection_id);

    match event {
        ClientEvent::JoinRoom { room_id, user } => {
            match session
                .on_join(connection_id, room_id, user.map(Into::into))
                .await
            {
                Ok(()) => {}
                Err(SessionError::InvalidJoin(reason)) => {
                    tracing::warn!("Rejected join from '{}': {}", connection_id, reason);
                }
                Err(e @ SessionError::UnknownConnection(_)) => {
                    tracing::error!("Join failed: {}", e);
                }
            }
        }
        ClientEvent::SendChatMessage { message, .. } => {
            session.on_chat_message(connection_id, message).await;
        }
        ClientEvent::UpdateNotes { content, .. } => {
            session.on_document_update(connection_id, content).await;
        }
        ClientEvent::DrawingData { room_id, data } => {
            session
                .on_drawing_event(connection_id, room_id, DrawingPayload(data))
                .await;
        }
        ClientEvent::LeaveRoom { .. } => {
            session.on_leave(connection_id).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        infrastructure::{dto::websocket::ServerEvent, message_pusher::WebSocketBroadcastChannel},
        usecase::DrawingRelayPolicy,
    };
    use studysphere_shared::time::FixedClock;

    async fn connected_session() -> (
        SessionCoordinator,
        ConnectionId,
        mpsc::UnboundedReceiver<String>,
    ) {
        let session = SessionCoordinator::new(
            Arc::new(WebSocketBroadcastChannel::new()),
            Arc::new(FixedClock::new(0)),
            DrawingRelayPolicy::default(),
        );
        let connection_id = ConnectionId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        session.on_connect(connection_id.clone(), tx).await;
        (session, connection_id, rx)
    }

    fn next_event(rx: &mut mpsc::UnboundedReceiver<String>) -> ServerEvent {
        let frame = rx.try_recv().unwrap();
        serde_json::from_str(&frame).unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_join_then_chat() {
        // テスト項目: join_room → send_chat_message のフレームがセッションに届き、応答が送信キューに入る
        // given (前提条件):
        let (session, connection_id, mut rx) = connected_session().await;

        // when (操作):
        dispatch(
            &session,
            &connection_id,
            r#"{"type":"join_room","room_id":"R1","user":{"id":"u1","username":"alice"}}"#,
        )
        .await;
        dispatch(
            &session,
            &connection_id,
            r#"{"type":"send_chat_message","room_id":"R1","message":"hi"}"#,
        )
        .await;

        // then (期待する結果):
        assert!(matches!(next_event(&mut rx), ServerEvent::RoomState { .. }));
        assert!(matches!(next_event(&mut rx), ServerEvent::UserJoined { .. }));
        let ServerEvent::ChatMessage(chat) = next_event(&mut rx) else {
            panic!("expected chat_message");
        };
        assert_eq!(chat.message, "hi");
        assert_eq!(chat.username, "alice");
    }

    #[tokio::test]
    async fn test_dispatch_drops_malformed_frames() {
        // テスト項目: 不正なフレームや未知のイベントは破棄され、何も送信されない
        let (session, connection_id, mut rx) = connected_session().await;

        dispatch(&session, &connection_id, "not json").await;
        dispatch(&session, &connection_id, r#"{"type":"dance"}"#).await;
        dispatch(&session, &connection_id, r#"{"type":"join_room","room_id":"R1"}"#).await;

        assert!(rx.try_recv().is_err());
        assert_eq!(session.room_count().await, 0);
    }
}
