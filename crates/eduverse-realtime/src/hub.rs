//! Central coordinator for WebSocket connections and rooms.

use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use eduverse_core::config::RealtimeConfig;
use eduverse_core::{AppError, AppResult};

use crate::channel::{ChannelRegistry, chat_room};
use crate::connection::{ConnectionHandle, ConnectionPool};
use crate::guard::RoomAuthorizer;
use crate::message::{InboundMessage, OutboundMessage};

/// Owns the connection pool and room registry, enforces per-user and
/// per-connection limits, and routes inbound control frames.
///
/// The HTTP layer calls [`RealtimeHub::register`] after the upgrade and
/// [`RealtimeHub::handle_inbound`] for each parsed frame; the
/// [`crate::EventBridge`] calls the broadcast side.
pub struct RealtimeHub {
    pool: ConnectionPool,
    registry: ChannelRegistry,
    guard: Arc<dyn RoomAuthorizer>,
    config: RealtimeConfig,
}

impl RealtimeHub {
    pub fn new(guard: Arc<dyn RoomAuthorizer>, config: RealtimeConfig) -> Self {
        Self {
            pool: ConnectionPool::new(),
            registry: ChannelRegistry::new(),
            guard,
            config,
        }
    }

    /// Register a new connection for an authenticated user.
    ///
    /// Fails with a conflict if the user already holds the maximum number
    /// of connections. Returns the handle plus the receiver the socket
    /// task drains into the actual WebSocket.
    pub fn register(
        &self,
        user_id: Uuid,
        username: String,
    ) -> AppResult<(Arc<ConnectionHandle>, mpsc::Receiver<OutboundMessage>)> {
        if self.pool.user_connection_count(user_id) >= self.config.max_connections_per_user {
            return Err(AppError::conflict("Too many simultaneous connections"));
        }
        let (handle, receiver) =
            ConnectionHandle::new(user_id, username, self.config.channel_buffer_size);
        self.pool.add(Arc::clone(&handle));
        tracing::debug!(
            connection_id = %handle.id,
            username = %handle.username,
            total = self.pool.connection_count(),
            "websocket connection registered"
        );
        Ok((handle, receiver))
    }

    /// Remove a connection and all of its room subscriptions.
    pub fn unregister(&self, connection_id: Uuid) {
        self.registry.unsubscribe_all(connection_id);
        if let Some(handle) = self.pool.remove(connection_id) {
            handle.mark_dead();
            tracing::debug!(
                connection_id = %connection_id,
                username = %handle.username,
                "websocket connection removed"
            );
        }
    }

    /// Route one inbound frame; any reply is queued on the same connection.
    pub async fn handle_inbound(&self, connection_id: Uuid, frame: InboundMessage) {
        let Some(handle) = self.pool.get(connection_id) else {
            return;
        };
        match frame {
            InboundMessage::Ping => {
                handle.try_send(OutboundMessage::Pong);
            }
            InboundMessage::Join { chat_id } => {
                let reply = self.join_room(&handle, chat_id).await;
                handle.try_send(reply);
            }
            InboundMessage::Leave { chat_id } => {
                self.registry.unsubscribe(&chat_room(chat_id), connection_id);
                handle.try_send(OutboundMessage::Left { chat_id });
            }
        }
    }

    async fn join_room(&self, handle: &ConnectionHandle, chat_id: Uuid) -> OutboundMessage {
        if self.registry.subscription_count(handle.id)
            >= self.config.max_subscriptions_per_connection
        {
            return OutboundMessage::Error {
                message: "Subscription limit reached".into(),
            };
        }
        match self.guard.can_join(handle.user_id, chat_id).await {
            Ok(true) => {
                self.registry.subscribe(&chat_room(chat_id), handle.id);
                OutboundMessage::Joined { chat_id }
            }
            Ok(false) => OutboundMessage::Error {
                message: "Not a participant of this chat".into(),
            },
            Err(error) => {
                tracing::error!(%chat_id, %error, "room membership check failed");
                OutboundMessage::Error {
                    message: "Unable to join chat".into(),
                }
            }
        }
    }

    /// Queue a frame on every subscriber of a chat's room.
    pub fn broadcast_to_chat(&self, chat_id: Uuid, message: &OutboundMessage) -> usize {
        self.registry
            .broadcast(&chat_room(chat_id), &self.pool, message)
    }

    /// Queue a frame on every live connection of a user.
    pub fn send_to_user(&self, user_id: Uuid, message: &OutboundMessage) -> usize {
        self.pool.send_to_user(user_id, message)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// Authorizer with a fixed membership table.
    struct StaticGuard {
        members: Mutex<HashSet<(Uuid, Uuid)>>,
    }

    impl StaticGuard {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                members: Mutex::new(HashSet::new()),
            })
        }

        fn allow(&self, user_id: Uuid, chat_id: Uuid) {
            self.members.lock().unwrap().insert((user_id, chat_id));
        }
    }

    #[async_trait]
    impl RoomAuthorizer for StaticGuard {
        async fn can_join(&self, user_id: Uuid, chat_id: Uuid) -> AppResult<bool> {
            Ok(self.members.lock().unwrap().contains(&(user_id, chat_id)))
        }
    }

    fn test_config() -> RealtimeConfig {
        RealtimeConfig {
            max_connections_per_user: 2,
            channel_buffer_size: 8,
            max_subscriptions_per_connection: 2,
        }
    }

    #[tokio::test]
    async fn participant_can_join_and_receives_broadcasts() {
        let guard = StaticGuard::new();
        let hub = RealtimeHub::new(Arc::clone(&guard) as Arc<dyn RoomAuthorizer>, test_config());
        let user_id = Uuid::new_v4();
        let chat_id = Uuid::new_v4();
        guard.allow(user_id, chat_id);

        let (handle, mut rx) = hub.register(user_id, "anna".into()).unwrap();
        hub.handle_inbound(handle.id, InboundMessage::Join { chat_id })
            .await;
        assert!(matches!(
            rx.recv().await,
            Some(OutboundMessage::Joined { chat_id: id }) if id == chat_id
        ));

        let queued = hub.broadcast_to_chat(chat_id, &OutboundMessage::Pong);
        assert_eq!(queued, 1);
    }

    #[tokio::test]
    async fn non_participant_join_is_rejected() {
        let guard = StaticGuard::new();
        let hub = RealtimeHub::new(Arc::clone(&guard) as Arc<dyn RoomAuthorizer>, test_config());
        let chat_id = Uuid::new_v4();

        let (handle, mut rx) = hub.register(Uuid::new_v4(), "boris".into()).unwrap();
        hub.handle_inbound(handle.id, InboundMessage::Join { chat_id })
            .await;
        assert!(matches!(rx.recv().await, Some(OutboundMessage::Error { .. })));
        assert_eq!(hub.broadcast_to_chat(chat_id, &OutboundMessage::Pong), 0);
    }

    #[tokio::test]
    async fn connection_limit_is_enforced_per_user() {
        let guard = StaticGuard::new();
        let hub = RealtimeHub::new(guard as Arc<dyn RoomAuthorizer>, test_config());
        let user_id = Uuid::new_v4();

        let _first = hub.register(user_id, "anna".into()).unwrap();
        let _second = hub.register(user_id, "anna".into()).unwrap();
        let third = hub.register(user_id, "anna".into());
        assert!(third.is_err());

        // Another user is unaffected.
        assert!(hub.register(Uuid::new_v4(), "boris".into()).is_ok());
    }

    #[tokio::test]
    async fn subscription_limit_is_enforced_per_connection() {
        let guard = StaticGuard::new();
        let hub = RealtimeHub::new(Arc::clone(&guard) as Arc<dyn RoomAuthorizer>, test_config());
        let user_id = Uuid::new_v4();

        let (handle, mut rx) = hub.register(user_id, "anna".into()).unwrap();
        for _ in 0..3 {
            let chat_id = Uuid::new_v4();
            guard.allow(user_id, chat_id);
            hub.handle_inbound(handle.id, InboundMessage::Join { chat_id })
                .await;
        }

        assert!(matches!(rx.recv().await, Some(OutboundMessage::Joined { .. })));
        assert!(matches!(rx.recv().await, Some(OutboundMessage::Joined { .. })));
        assert!(matches!(rx.recv().await, Some(OutboundMessage::Error { .. })));
    }

    #[tokio::test]
    async fn leave_stops_delivery_and_unregister_frees_the_slot() {
        let guard = StaticGuard::new();
        let hub = RealtimeHub::new(Arc::clone(&guard) as Arc<dyn RoomAuthorizer>, test_config());
        let user_id = Uuid::new_v4();
        let chat_id = Uuid::new_v4();
        guard.allow(user_id, chat_id);

        let (handle, mut rx) = hub.register(user_id, "anna".into()).unwrap();
        hub.handle_inbound(handle.id, InboundMessage::Join { chat_id })
            .await;
        hub.handle_inbound(handle.id, InboundMessage::Leave { chat_id })
            .await;
        assert_eq!(hub.broadcast_to_chat(chat_id, &OutboundMessage::Pong), 0);

        assert!(matches!(rx.recv().await, Some(OutboundMessage::Joined { .. })));
        assert!(matches!(rx.recv().await, Some(OutboundMessage::Left { .. })));

        let _second = hub.register(user_id, "anna".into()).unwrap();
        hub.unregister(handle.id);
        // The freed slot can be reused.
        assert!(hub.register(user_id, "anna".into()).is_ok());
    }
}
