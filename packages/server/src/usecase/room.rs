//! UseCase: durable room records (create, join by code, list)

use std::sync::Arc;

use crate::domain::{RepositoryError, Room, RoomCode, RoomName, RoomStore, UserId};

use super::error::RoomError;

/// Upper bound of rooms returned by [`ListMyRoomsUseCase`]
pub const MY_ROOMS_LIMIT: usize = 100;

pub struct CreateRoomUseCase {
    rooms: Arc<dyn RoomStore>,
}

impl CreateRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomStore>) -> Self {
        Self { rooms }
    }

    /// Create a room owned by `owner`, who becomes its first participant.
    pub async fn execute(&self, owner: &UserId, name: String) -> Result<Room, RoomError> {
        let name = RoomName::new(name)?;
        let room = self
            .rooms
            .create_room(name, owner.clone())
            .await
            .map_err(store_error)?;
        tracing::info!(
            "Room '{}' ({}) created by '{}' with code {}",
            room.name,
            room.id,
            owner,
            room.code.as_str()
        );
        Ok(room)
    }
}

pub struct JoinRoomByCodeUseCase {
    rooms: Arc<dyn RoomStore>,
}

impl JoinRoomByCodeUseCase {
    pub fn new(rooms: Arc<dyn RoomStore>) -> Self {
        Self { rooms }
    }

    /// Add `user_id` to the room with `code`. Joining twice is harmless.
    ///
    /// A malformed code cannot match any room and is reported as `NotFound`.
    pub async fn execute(&self, user_id: &UserId, code: String) -> Result<Room, RoomError> {
        let code = RoomCode::new(code).map_err(|_| RoomError::NotFound)?;
        let room = self.rooms.find_by_code(&code).await.map_err(store_error)?;
        if room.has_participant(user_id) {
            return Ok(room);
        }
        let room = self
            .rooms
            .add_participant(&room.id, user_id)
            .await
            .map_err(store_error)?;
        tracing::info!("'{}' joined room '{}' by code", user_id, room.id);
        Ok(room)
    }
}

pub struct ListMyRoomsUseCase {
    rooms: Arc<dyn RoomStore>,
}

impl ListMyRoomsUseCase {
    pub fn new(rooms: Arc<dyn RoomStore>) -> Self {
        Self { rooms }
    }

    pub async fn execute(&self, user_id: &UserId) -> Result<Vec<Room>, RoomError> {
        self.rooms
            .list_for_user(user_id, MY_ROOMS_LIMIT)
            .await
            .map_err(store_error)
    }
}

fn store_error(error: RepositoryError) -> RoomError {
    match error {
        RepositoryError::NotFound(_) => RoomError::NotFound,
        other => RoomError::Internal(other.to_string()),
    }
}
