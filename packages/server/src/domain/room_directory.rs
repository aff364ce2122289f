//! Directory of live rooms.
//!
//! Each room sits behind its own mutex, which is the serialization point for
//! everything happening in that room. Rooms are created lazily on first
//! reference and removed only by [`RoomDirectory::reap_idle`].

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{
    room_state::RoomState,
    value_object::{RoomId, Timestamp},
};

pub type RoomHandle = Arc<Mutex<RoomState>>;

#[derive(Debug, Default)]
pub struct RoomDirectory {
    rooms: Mutex<HashMap<RoomId, RoomHandle>>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The handle for `room_id`, creating an empty room on first reference.
    pub async fn get_or_create(&self, room_id: &RoomId, now: Timestamp) -> RoomHandle {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(room_id.clone())
            .or_insert_with(|| {
                tracing::info!("Room '{}' created", room_id);
                Arc::new(Mutex::new(RoomState::new(room_id.clone(), now)))
            })
            .clone()
    }

    pub async fn get(&self, room_id: &RoomId) -> Option<RoomHandle> {
        self.rooms.lock().await.get(room_id).cloned()
    }

    /// Lock the room, creating it if needed.
    ///
    /// A room reaped between lookup and lock is retired; in that case a fresh
    /// room is looked up again so the caller never mutates an orphan.
    pub async fn lock_or_create(&self, room_id: &RoomId, now: Timestamp) -> OwnedMutexGuard<RoomState> {
        loop {
            let guard = self.get_or_create(room_id, now).await.lock_owned().await;
            if !guard.is_retired() {
                return guard;
            }
        }
    }

    /// Lock an existing room. Unknown and retired rooms yield `None`.
    pub async fn lock(&self, room_id: &RoomId) -> Option<OwnedMutexGuard<RoomState>> {
        let guard = self.get(room_id).await?.lock_owned().await;
        (!guard.is_retired()).then_some(guard)
    }

    /// Remove every room without present users that has been idle for at
    /// least `idle_timeout`. Rooms currently locked are busy and skipped.
    pub async fn reap_idle(&self, now: Timestamp, idle_timeout: Duration) -> Vec<RoomId> {
        let idle_timeout_millis = u64::try_from(idle_timeout.as_millis()).unwrap_or(u64::MAX);
        let mut rooms = self.rooms.lock().await;
        let mut reaped = Vec::new();

        rooms.retain(|room_id, handle| {
            let Ok(mut room) = handle.try_lock() else {
                return true;
            };
            if room.is_idle(now, idle_timeout_millis) {
                room.retire();
                reaped.push(room_id.clone());
                false
            } else {
                true
            }
        });

        reaped
    }

    pub async fn len(&self) -> usize {
        self.rooms.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rooms.lock().await.is_empty()
    }
}
