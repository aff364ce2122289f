//! Domain layer: value objects, entities, the live room model and the
//! interfaces the outer layers implement.

pub mod auth;
pub mod connection_registry;
pub mod entity;
pub mod error;
pub mod event;
pub mod pusher;
pub mod repository;
pub mod room_directory;
pub mod room_state;
pub mod value_object;

pub use auth::{AuthProvider, PasswordHasher};
pub use connection_registry::{ConnectionEntry, ConnectionRegistry};
pub use entity::{ChatMessage, PresentUser, Room, RoomSnapshot, UserAccount, UserIdentity};
pub use error::{AuthError, MessagePushError, RegistryError, RepositoryError, ValueObjectError};
pub use event::{DrawingPayload, RoomEvent};
pub use pusher::{BroadcastChannel, PusherChannel};
pub use repository::{RoomStore, UserStore};
pub use room_directory::{RoomDirectory, RoomHandle};
pub use room_state::{CHAT_HISTORY_CAPACITY, RoomState};
pub use value_object::{
    ConnectionId, Email, MessageId, RoomCode, RoomId, RoomName, Timestamp, UserId, Username,
};
