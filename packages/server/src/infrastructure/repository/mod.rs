//! Store implementations.
//!
//! - `inmemory`: process-local stores

pub mod inmemory;

pub use inmemory::{InMemoryRoomStore, InMemoryUserStore};
