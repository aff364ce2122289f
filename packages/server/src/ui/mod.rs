//! UI layer: HTTP and WebSocket entry points of the collaboration server.

mod error;
mod extractor;
mod handler;
mod reaper;
mod server;
mod signal;
pub mod state;

pub use error::ApiError;
pub use reaper::spawn_room_reaper;
pub use server::Server;
pub use state::AppState;
