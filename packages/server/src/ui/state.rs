//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    AuthenticateUseCase, CreateRoomUseCase, JoinRoomByCodeUseCase, ListMyRoomsUseCase,
    LoginUseCase, RegisterUserUseCase, SessionCoordinator,
};

pub struct AppState {
    /// Live room sessions
    pub session: Arc<SessionCoordinator>,
    pub register_user_usecase: Arc<RegisterUserUseCase>,
    pub login_usecase: Arc<LoginUseCase>,
    pub authenticate_usecase: Arc<AuthenticateUseCase>,
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub join_room_usecase: Arc<JoinRoomByCodeUseCase>,
    pub list_my_rooms_usecase: Arc<ListMyRoomsUseCase>,
}
