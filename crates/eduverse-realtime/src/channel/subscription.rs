//! Reverse index from connection to subscribed rooms.
//!
//! Needed for O(rooms-of-connection) cleanup when a socket disconnects,
//! instead of scanning every room.

use std::collections::HashSet;

use dashmap::DashMap;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct SubscriptionTracker {
    rooms_by_connection: DashMap<Uuid, HashSet<String>>,
}

impl SubscriptionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, connection_id: Uuid, room: &str) {
        self.rooms_by_connection
            .entry(connection_id)
            .or_default()
            .insert(room.to_owned());
    }

    pub fn forget(&self, connection_id: Uuid, room: &str) {
        if let Some(mut rooms) = self.rooms_by_connection.get_mut(&connection_id) {
            rooms.remove(room);
        }
        self.rooms_by_connection
            .remove_if(&connection_id, |_, rooms| rooms.is_empty());
    }

    /// Number of rooms this connection is subscribed to.
    pub fn count(&self, connection_id: Uuid) -> usize {
        self.rooms_by_connection
            .get(&connection_id)
            .map_or(0, |rooms| rooms.len())
    }

    /// Remove the connection's entry and return every room it was in.
    pub fn drain(&self, connection_id: Uuid) -> Vec<String> {
        self.rooms_by_connection
            .remove(&connection_id)
            .map(|(_, rooms)| rooms.into_iter().collect())
            .unwrap_or_default()
    }
}
