//! Dependency wiring.

use std::sync::Arc;

use studysphere_shared::time::{Clock, SystemClock};

use crate::{
    config::ServerConfig,
    domain::{AuthProvider, PasswordHasher, RoomStore, UserStore},
    infrastructure::{
        auth::{BcryptPasswordHasher, JwtAuthProvider},
        message_pusher::WebSocketBroadcastChannel,
        repository::{InMemoryRoomStore, InMemoryUserStore},
    },
    ui::AppState,
    usecase::{
        AuthenticateUseCase, CreateRoomUseCase, JoinRoomByCodeUseCase, ListMyRoomsUseCase,
        LoginUseCase, RegisterUserUseCase, SessionCoordinator,
    },
};

/// Build the application state from `config`.
///
/// Dependencies are created in order:
/// 1. Clock
/// 2. Stores
/// 3. Credential handling
/// 4. BroadcastChannel
/// 5. UseCases
pub fn build_app_state(config: &ServerConfig) -> Arc<AppState> {
    // 1. Clock
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 2. Stores (in-memory database)
    let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
    let rooms: Arc<dyn RoomStore> = Arc::new(InMemoryRoomStore::new(clock.clone()));

    // 3. Credential handling
    let auth: Arc<dyn AuthProvider> =
        Arc::new(JwtAuthProvider::new(&config.jwt_secret, config.token_ttl));
    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost));

    // 4. BroadcastChannel (WebSocket implementation)
    let channel = Arc::new(WebSocketBroadcastChannel::new());

    // 5. UseCases
    let session = Arc::new(SessionCoordinator::new(
        channel,
        clock.clone(),
        config.drawing_relay,
    ));

    Arc::new(AppState {
        session,
        register_user_usecase: Arc::new(RegisterUserUseCase::new(
            users.clone(),
            hasher.clone(),
            auth.clone(),
            clock,
        )),
        login_usecase: Arc::new(LoginUseCase::new(users.clone(), hasher, auth.clone())),
        authenticate_usecase: Arc::new(AuthenticateUseCase::new(users, auth)),
        create_room_usecase: Arc::new(CreateRoomUseCase::new(rooms.clone())),
        join_room_usecase: Arc::new(JoinRoomByCodeUseCase::new(rooms.clone())),
        list_my_rooms_usecase: Arc::new(ListMyRoomsUseCase::new(rooms)),
    })
}
