pub mod room;
pub mod user;

pub use room::InMemoryRoomStore;
pub use user::InMemoryUserStore;
