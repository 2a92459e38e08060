//! A single broadcast room and room key helpers.

use std::collections::HashSet;

use uuid::Uuid;

/// Room key for a chat's live events.
pub fn chat_room(chat_id: Uuid) -> String {
    format!("chat:{chat_id}")
}

/// The set of connections subscribed to one room key.
#[derive(Debug, Default)]
pub struct Room {
    subscribers: HashSet<Uuid>,
}

impl Room {
    /// Add a subscriber; returns `false` if it was already present.
    pub fn subscribe(&mut self, connection_id: Uuid) -> bool {
        self.subscribers.insert(connection_id)
    }

    /// Remove a subscriber; returns `false` if it was not present.
    pub fn unsubscribe(&mut self, connection_id: Uuid) -> bool {
        self.subscribers.remove(&connection_id)
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn subscriber_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.subscribers.iter().copied()
    }
}
