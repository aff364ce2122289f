//! Request handlers.

mod account;
mod http;
mod room;
mod websocket;

pub use account::{login, register};
pub use http::{debug_room_state, health_check};
pub use room::{create_room, join_room, my_rooms};
pub use websocket::websocket_handler;
