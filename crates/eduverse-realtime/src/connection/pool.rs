//! Registry of live connections, indexed by connection ID and by user.

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::connection::ConnectionHandle;
use crate::message::OutboundMessage;

/// All live connections, with a per-user index for targeted delivery.
#[derive(Debug, Default)]
pub struct ConnectionPool {
    by_id: DashMap<Uuid, Arc<ConnectionHandle>>,
    by_user: DashMap<Uuid, Vec<Uuid>>,
}

impl ConnectionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of connections a user currently holds.
    pub fn user_connection_count(&self, user_id: Uuid) -> usize {
        self.by_user.get(&user_id).map_or(0, |ids| ids.len())
    }

    /// Register a connection in both indexes.
    pub fn add(&self, handle: Arc<ConnectionHandle>) {
        self.by_user
            .entry(handle.user_id)
            .or_default()
            .push(handle.id);
        self.by_id.insert(handle.id, handle);
    }

    /// Remove a connection; returns the handle if it was registered.
    pub fn remove(&self, connection_id: Uuid) -> Option<Arc<ConnectionHandle>> {
        let (_, handle) = self.by_id.remove(&connection_id)?;
        if let Some(mut ids) = self.by_user.get_mut(&handle.user_id) {
            ids.retain(|id| *id != connection_id);
        }
        // Drop the empty user entry so the map does not grow forever.
        self.by_user
            .remove_if(&handle.user_id, |_, ids| ids.is_empty());
        Some(handle)
    }

    pub fn get(&self, connection_id: Uuid) -> Option<Arc<ConnectionHandle>> {
        self.by_id.get(&connection_id).map(|h| Arc::clone(&h))
    }

    /// All live connections for a user.
    pub fn user_connections(&self, user_id: Uuid) -> Vec<Arc<ConnectionHandle>> {
        let Some(ids) = self.by_user.get(&user_id) else {
            return Vec::new();
        };
        ids.iter()
            .filter_map(|id| self.by_id.get(id).map(|h| Arc::clone(&h)))
            .filter(|h| h.is_alive())
            .collect()
    }

    /// Push a frame to every live connection of a user.
    ///
    /// Returns the number of connections the frame was queued on.
    pub fn send_to_user(&self, user_id: Uuid, message: &OutboundMessage) -> usize {
        self.user_connections(user_id)
            .iter()
            .filter(|h| h.try_send(message.clone()))
            .count()
    }

    pub fn connection_count(&self) -> usize {
        self.by_id.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn user_index_tracks_multiple_connections() {
        let pool = ConnectionPool::new();
        let user_id = Uuid::new_v4();
        let (first, _rx1) = ConnectionHandle::new(user_id, "sidorov".into(), 4);
        let (second, _rx2) = ConnectionHandle::new(user_id, "sidorov".into(), 4);
        pool.add(Arc::clone(&first));
        pool.add(Arc::clone(&second));

        assert_eq!(pool.user_connection_count(user_id), 2);

        pool.remove(first.id);
        assert_eq!(pool.user_connection_count(user_id), 1);
        assert!(pool.get(first.id).is_none());
        assert!(pool.get(second.id).is_some());

        pool.remove(second.id);
        assert_eq!(pool.user_connection_count(user_id), 0);
    }

    #[tokio::test]
    async fn send_to_user_reaches_every_live_socket() {
        let pool = ConnectionPool::new();
        let user_id = Uuid::new_v4();
        let (first, mut rx1) = ConnectionHandle::new(user_id, "sidorov".into(), 4);
        let (second, mut rx2) = ConnectionHandle::new(user_id, "sidorov".into(), 4);
        pool.add(first);
        pool.add(second);

        let queued = pool.send_to_user(user_id, &OutboundMessage::Pong);
        assert_eq!(queued, 2);
        assert!(matches!(rx1.recv().await, Some(OutboundMessage::Pong)));
        assert!(matches!(rx2.recv().await, Some(OutboundMessage::Pong)));
    }

    #[tokio::test]
    async fn dead_connections_are_skipped() {
        let pool = ConnectionPool::new();
        let user_id = Uuid::new_v4();
        let (handle, rx) = ConnectionHandle::new(user_id, "sidorov".into(), 4);
        pool.add(handle);
        drop(rx);

        // First send discovers the closed receiver and marks it dead.
        assert_eq!(pool.send_to_user(user_id, &OutboundMessage::Pong), 0);
        assert!(pool.user_connections(user_id).is_empty());
    }
}
