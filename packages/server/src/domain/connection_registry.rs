//! Registry of live connections and the room each one is attached to.
//!
//! Pure in-memory bookkeeping: the registry never talks to the transport.

use std::collections::HashMap;

use super::{
    entity::UserIdentity,
    error::RegistryError,
    value_object::{ConnectionId, RoomId},
};

/// Session metadata of one live connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionEntry {
    pub connection_id: ConnectionId,
    /// Set on join; `None` until the connection first joins a room
    pub identity: Option<UserIdentity>,
    /// Set on join, cleared on leave
    pub room_id: Option<RoomId>,
}

impl ConnectionEntry {
    fn new(connection_id: ConnectionId) -> Self {
        Self {
            connection_id,
            identity: None,
            room_id: None,
        }
    }

    /// The room and identity of a joined connection, or `None` when idle.
    pub fn membership(&self) -> Option<(&RoomId, &UserIdentity)> {
        match (&self.room_id, &self.identity) {
            (Some(room_id), Some(identity)) => Some((room_id, identity)),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    entries: HashMap<ConnectionId, ConnectionEntry>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty entry. Registering twice keeps the existing entry.
    pub fn register(&mut self, connection_id: ConnectionId) {
        self.entries
            .entry(connection_id.clone())
            .or_insert_with(|| ConnectionEntry::new(connection_id));
    }

    pub fn attach(
        &mut self,
        connection_id: &ConnectionId,
        identity: UserIdentity,
        room_id: RoomId,
    ) -> Result<(), RegistryError> {
        let entry = self
            .entries
            .get_mut(connection_id)
            .ok_or_else(|| RegistryError::UnknownConnection(connection_id.to_string()))?;
        entry.identity = Some(identity);
        entry.room_id = Some(room_id);
        Ok(())
    }

    pub fn lookup(&self, connection_id: &ConnectionId) -> Option<&ConnectionEntry> {
        self.entries.get(connection_id)
    }

    /// Clear the room of a joined connection, returning what it was attached to.
    pub fn detach(&mut self, connection_id: &ConnectionId) -> Option<(RoomId, UserIdentity)> {
        let entry = self.entries.get_mut(connection_id)?;
        let room_id = entry.room_id.take()?;
        let identity = entry.identity.clone()?;
        Some((room_id, identity))
    }

    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<ConnectionEntry> {
        self.entries.remove(connection_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
