//! Store traits for durable records.
//!
//! The use case layer depends on these traits only; concrete stores live in
//! the infrastructure layer.

use async_trait::async_trait;

use super::{
    entity::{Room, UserAccount},
    error::RepositoryError,
    value_object::{Email, RoomCode, RoomId, RoomName, UserId, Username},
};

#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Create a room with a fresh id and a unique join code. The owner is
    /// its first participant.
    async fn create_room(&self, name: RoomName, owner: UserId) -> Result<Room, RepositoryError>;

    async fn find_by_code(&self, code: &RoomCode) -> Result<Room, RepositoryError>;

    /// Add `user_id` to the participants; already present is not an error.
    async fn add_participant(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
    ) -> Result<Room, RepositoryError>;

    /// Rooms the user participates in, at most `limit`
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<Room>, RepositoryError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new account. Fails with `Conflict("email")` or
    /// `Conflict("username")` when either is already taken.
    async fn insert(&self, account: UserAccount) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<UserAccount>, RepositoryError>;

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, RepositoryError>;
}
