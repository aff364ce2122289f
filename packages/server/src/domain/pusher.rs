//! Transport abstraction the session core pushes events through.
//!
//! The domain layer defines what it needs from a transport; the
//! infrastructure layer provides the implementation (dependency inversion).

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, event::RoomEvent, value_object::ConnectionId};

/// Outbound queue of one connection. Encoded frames are pushed here and
/// drained by the connection's writer task.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait BroadcastChannel: Send + Sync {
    /// Make a connection reachable
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Forget a connection; later pushes to it fail
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// Deliver `event` to exactly one connection
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// Deliver `event` to every target.
    ///
    /// Best effort: a failing recipient is logged and skipped, it never
    /// prevents delivery to the others.
    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;
}
