//! UseCase layer: application logic on top of the domain model.
//!
//! - `session_coordinator`: live room sessions over WebSocket
//! - `account`: registration, login and token authentication
//! - `room`: durable room records

pub mod account;
pub mod error;
pub mod room;
pub mod session_coordinator;

pub use account::{AuthSession, AuthenticateUseCase, LoginUseCase, RegisterUserUseCase};
pub use error::{AccountError, RoomError, SessionError};
pub use room::{CreateRoomUseCase, JoinRoomByCodeUseCase, ListMyRoomsUseCase, MY_ROOMS_LIMIT};
pub use session_coordinator::{DrawingRelayPolicy, JoinUser, SessionCoordinator};
