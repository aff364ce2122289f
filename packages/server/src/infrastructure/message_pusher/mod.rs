//! Transport implementations of `BroadcastChannel`.
//!
//! - `websocket`: per-connection WebSocket outbound queues

pub mod websocket;

pub use websocket::WebSocketBroadcastChannel;
