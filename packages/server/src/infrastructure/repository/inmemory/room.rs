//! InMemory RoomStore 実装
//!
//! ドメイン層が定義する RoomStore trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## 技術的負債
//!
//! プロセスの再起動でルームは失われます。永続化が必要になった時点で
//! DBMS を使う実装を追加する想定です。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use studysphere_shared::time::Clock;

use crate::domain::{
    RepositoryError, Room, RoomCode, RoomId, RoomName, RoomStore, Timestamp, UserId,
};

/// Give up after this many colliding join codes in a row
const MAX_CODE_ATTEMPTS: usize = 32;

pub struct InMemoryRoomStore {
    rooms: Mutex<HashMap<RoomId, Room>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            clock,
        }
    }
}

fn unused_code(rooms: &HashMap<RoomId, Room>) -> Option<RoomCode> {
    let mut rng = rand::thread_rng();
    (0..MAX_CODE_ATTEMPTS)
        .map(|_| RoomCode::generate(&mut rng))
        .find(|code| rooms.values().all(|room| &room.code != code))
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn create_room(&self, name: RoomName, owner: UserId) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;

        let code = unused_code(&rooms).ok_or_else(|| {
            RepositoryError::Storage("could not allocate a unique room code".to_string())
        })?;
        let room = Room {
            id: RoomId::generate(),
            name,
            code,
            created_by: owner.clone(),
            created_at: Timestamp::new(self.clock.now_millis()),
            participants: vec![owner],
        };
        rooms.insert(room.id.clone(), room.clone());

        Ok(room)
    }

    async fn find_by_code(&self, code: &RoomCode) -> Result<Room, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .values()
            .find(|room| &room.code == code)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("room with code {}", code.as_str())))
    }

    async fn add_participant(
        &self,
        room_id: &RoomId,
        user_id: &UserId,
    ) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("room {room_id}")))?;
        if !room.has_participant(user_id) {
            room.participants.push(user_id.clone());
        }
        Ok(room.clone())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<Room>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        let mut mine: Vec<Room> = rooms
            .values()
            .filter(|room| room.has_participant(user_id))
            .cloned()
            .collect();
        mine.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        mine.truncate(limit);
        Ok(mine)
    }
}
