//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use studysphere_server::{app::build_app_state, config::ServerConfig, ui::Server};
use tokio::{net::TcpStream, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration suited for tests: cheap password hashing
pub fn test_config() -> ServerConfig {
    ServerConfig {
        jwt_secret: "integration-test-secret".to_string(),
        bcrypt_cost: 4,
        ..ServerConfig::default()
    }
}

/// Start the router on an ephemeral port and return its address.
pub async fn spawn_server(config: ServerConfig) -> SocketAddr {
    let state = build_app_state(&config);
    let router = Server::new(config, state).router();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    addr
}

pub async fn connect(addr: SocketAddr) -> WsClient {
    let (ws, _response) = connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("Failed to connect WebSocket");
    ws
}

pub async fn send(ws: &mut WsClient, event: Value) {
    ws.send(Message::text(event.to_string()))
        .await
        .expect("Failed to send frame");
}

/// Next JSON event, skipping control frames. Panics after a timeout.
pub async fn recv(ws: &mut WsClient) -> Value {
    loop {
        let frame = timeout(RECV_TIMEOUT, ws.next())
            .await
            .expect("Timed out waiting for an event")
            .expect("Connection closed")
            .expect("WebSocket error");
        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).expect("Server sent invalid JSON");
        }
    }
}

/// Next event, asserting its type.
pub async fn recv_type(ws: &mut WsClient, expected: &str) -> Value {
    let event = recv(ws).await;
    assert_eq!(event["type"], expected, "unexpected event: {event}");
    event
}

/// Whether no event arrives within `wait`.
pub async fn is_silent(ws: &mut WsClient, wait: Duration) -> bool {
    timeout(wait, ws.next()).await.is_err()
}

pub async fn join(ws: &mut WsClient, room_id: &str, user_id: &str, username: &str) {
    send(
        ws,
        serde_json::json!({
            "type": "join_room",
            "room_id": room_id,
            "user": {"id": user_id, "username": username}
        }),
    )
    .await;
}
