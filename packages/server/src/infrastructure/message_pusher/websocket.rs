//! WebSocket を使った BroadcastChannel 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - `RoomEvent` を JSON にエンコードして送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、送信キューへの投入だけを行います。
//! 実際のソケット書き込みは接続ごとの writer タスクが担当するため、
//! ここでの送信がソケットの遅延でブロックされることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{BroadcastChannel, ConnectionId, MessagePushError, PusherChannel, RoomEvent},
    infrastructure::dto::websocket::ServerEvent,
};

#[derive(Default)]
pub struct WebSocketBroadcastChannel {
    /// 接続中のコネクションの送信キュー
    connections: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketBroadcastChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode a domain event into one wire frame.
    pub fn encode(event: &RoomEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerEvent::from(event.clone()))
            .map_err(|e| MessagePushError::Encode(e.to_string()))
    }
}

#[async_trait]
impl BroadcastChannel for WebSocketBroadcastChannel {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        tracing::debug!("Connection '{}' registered to BroadcastChannel", connection_id);
        connections.insert(connection_id, sender);
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from BroadcastChannel",
            connection_id
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(event)?;
        let connections = self.connections.lock().await;

        let sender = connections
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ConnectionNotFound(connection_id.to_string()))?;
        sender
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed {} to connection '{}'", event.name(), connection_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &RoomEvent,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(event)?;
        let connections = self.connections.lock().await;

        for target in targets {
            match connections.get(target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => {
                    if let Err(e) = sender.send(frame.clone()) {
                        tracing::warn!("Failed to push {} to '{}': {}", event.name(), target, e);
                    }
                }
                None => tracing::warn!(
                    "Connection '{}' not found during broadcast, skipping",
                    target
                ),
            }
        }
        tracing::debug!("Broadcasted {} to {} connection(s)", event.name(), targets.len());

        Ok(())
    }
}
