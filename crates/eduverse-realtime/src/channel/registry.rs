//! Room registry: maps room keys to subscriber sets and broadcasts frames.

use dashmap::DashMap;
use uuid::Uuid;

use crate::channel::room::Room;
use crate::channel::subscription::SubscriptionTracker;
use crate::connection::ConnectionPool;
use crate::message::OutboundMessage;

/// Concurrent map of room key to [`Room`], with a reverse index for
/// per-connection cleanup. Empty rooms are removed eagerly.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    rooms: DashMap<String, Room>,
    tracker: SubscriptionTracker,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a connection to a room.
    pub fn subscribe(&self, room: &str, connection_id: Uuid) {
        self.rooms
            .entry(room.to_owned())
            .or_default()
            .subscribe(connection_id);
        self.tracker.record(connection_id, room);
    }

    /// Unsubscribe a connection from a room.
    pub fn unsubscribe(&self, room: &str, connection_id: Uuid) {
        if let Some(mut entry) = self.rooms.get_mut(room) {
            entry.unsubscribe(connection_id);
        }
        self.rooms.remove_if(room, |_, r| r.is_empty());
        self.tracker.forget(connection_id, room);
    }

    /// Unsubscribe a connection from every room it joined.
    pub fn unsubscribe_all(&self, connection_id: Uuid) {
        for room in self.tracker.drain(connection_id) {
            if let Some(mut entry) = self.rooms.get_mut(&room) {
                entry.unsubscribe(connection_id);
            }
            self.rooms.remove_if(&room, |_, r| r.is_empty());
        }
    }

    /// Number of rooms a connection is subscribed to.
    pub fn subscription_count(&self, connection_id: Uuid) -> usize {
        self.tracker.count(connection_id)
    }

    /// Number of subscribers in a room.
    pub fn room_size(&self, room: &str) -> usize {
        self.rooms.get(room).map_or(0, |r| r.len())
    }

    /// Queue a frame on every live subscriber of a room.
    ///
    /// Returns the number of connections the frame was queued on. Collects
    /// the subscriber list before sending so no DashMap shard lock is held
    /// across `try_send`.
    pub fn broadcast(&self, room: &str, pool: &ConnectionPool, message: &OutboundMessage) -> usize {
        let subscribers: Vec<Uuid> = match self.rooms.get(room) {
            Some(entry) => entry.subscriber_ids().collect(),
            None => return 0,
        };
        subscribers
            .into_iter()
            .filter_map(|id| pool.get(id))
            .filter(|handle| handle.try_send(message.clone()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::channel::room::chat_room;
    use crate::connection::ConnectionHandle;

    #[tokio::test]
    async fn broadcast_reaches_only_subscribers() {
        let pool = ConnectionPool::new();
        let registry = ChannelRegistry::new();
        let room = chat_room(Uuid::new_v4());

        let (member, mut member_rx) = ConnectionHandle::new(Uuid::new_v4(), "anna".into(), 4);
        let (outsider, mut outsider_rx) = ConnectionHandle::new(Uuid::new_v4(), "boris".into(), 4);
        pool.add(Arc::clone(&member));
        pool.add(outsider);

        registry.subscribe(&room, member.id);

        let queued = registry.broadcast(&room, &pool, &OutboundMessage::Pong);
        assert_eq!(queued, 1);
        assert!(matches!(member_rx.recv().await, Some(OutboundMessage::Pong)));
        assert!(outsider_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unsubscribe_all_cleans_every_room() {
        let registry = ChannelRegistry::new();
        let connection_id = Uuid::new_v4();
        let first = chat_room(Uuid::new_v4());
        let second = chat_room(Uuid::new_v4());

        registry.subscribe(&first, connection_id);
        registry.subscribe(&second, connection_id);
        assert_eq!(registry.subscription_count(connection_id), 2);

        registry.unsubscribe_all(connection_id);
        assert_eq!(registry.subscription_count(connection_id), 0);
        assert_eq!(registry.room_size(&first), 0);
        assert_eq!(registry.room_size(&second), 0);
    }

    #[tokio::test]
    async fn empty_rooms_are_dropped() {
        let registry = ChannelRegistry::new();
        let connection_id = Uuid::new_v4();
        let room = chat_room(Uuid::new_v4());

        registry.subscribe(&room, connection_id);
        assert_eq!(registry.room_size(&room), 1);
        registry.unsubscribe(&room, connection_id);
        assert!(registry.rooms.is_empty());
    }
}
