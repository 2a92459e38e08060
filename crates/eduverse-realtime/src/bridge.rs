//! Bridges domain events onto live WebSocket delivery.

use std::sync::Arc;

use async_trait::async_trait;

use eduverse_core::events::{DomainEvent, EventPayload, NotificationEvent};
use eduverse_core::traits::EventPublisher;

use crate::hub::RealtimeHub;
use crate::message::OutboundMessage;

/// [`EventPublisher`] implementation that fans events out through the hub.
///
/// Chat events go to the chat's room, so only sockets that joined the room
/// receive them. Notification events go straight to the recipient's
/// connections, joined or not.
pub struct EventBridge {
    hub: Arc<RealtimeHub>,
}

impl EventBridge {
    pub fn new(hub: Arc<RealtimeHub>) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl EventPublisher for EventBridge {
    async fn publish(&self, event: DomainEvent) {
        match &event.payload {
            EventPayload::Chat(chat_event) => {
                let frame = OutboundMessage::from_chat_event(chat_event);
                let delivered = self
                    .hub
                    .broadcast_to_chat(chat_event.chat_id(), &frame);
                tracing::debug!(
                    event_id = %event.id,
                    chat_id = %chat_event.chat_id(),
                    delivered,
                    "chat event broadcast"
                );
            }
            EventPayload::Notification(notification_event) => {
                let NotificationEvent::Created { user_id, .. } = notification_event;
                let frame = OutboundMessage::from_notification_event(notification_event);
                let delivered = self.hub.send_to_user(*user_id, &frame);
                tracing::debug!(
                    event_id = %event.id,
                    recipient = %user_id,
                    delivered,
                    "notification event delivered"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use eduverse_core::AppResult;
    use eduverse_core::config::RealtimeConfig;
    use eduverse_core::events::ChatEvent;

    use super::*;
    use crate::guard::RoomAuthorizer;
    use crate::message::InboundMessage;

    struct AllowAll;

    #[async_trait]
    impl RoomAuthorizer for AllowAll {
        async fn can_join(&self, _user_id: Uuid, _chat_id: Uuid) -> AppResult<bool> {
            Ok(true)
        }
    }

    fn hub() -> Arc<RealtimeHub> {
        Arc::new(RealtimeHub::new(Arc::new(AllowAll), RealtimeConfig::default()))
    }

    #[tokio::test]
    async fn chat_event_reaches_room_subscribers_only() {
        let hub = hub();
        let bridge = EventBridge::new(Arc::clone(&hub));
        let chat_id = Uuid::new_v4();

        let (member, mut member_rx) = hub.register(Uuid::new_v4(), "anna".into()).unwrap();
        let (_outsider, mut outsider_rx) = hub.register(Uuid::new_v4(), "boris".into()).unwrap();
        hub.handle_inbound(member.id, InboundMessage::Join { chat_id })
            .await;
        // Drain the join acknowledgement.
        member_rx.recv().await;

        let event = DomainEvent::new(
            None,
            EventPayload::Chat(ChatEvent::MessageSent {
                chat_id,
                message_id: Uuid::new_v4(),
                sender_id: Uuid::new_v4(),
                sender_name: "carol".into(),
                content: "hello class".into(),
                reply_to: None,
                sent_at: Utc::now(),
            }),
        );
        bridge.publish(event).await;

        match member_rx.recv().await {
            Some(OutboundMessage::ChatMessage { content, .. }) => {
                assert_eq!(content, "hello class");
            }
            other => panic!("unexpected frame: {other:?}"),
        }
        assert!(outsider_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn notification_event_reaches_recipient_without_a_room() {
        let hub = hub();
        let bridge = EventBridge::new(Arc::clone(&hub));
        let recipient = Uuid::new_v4();

        let (_conn, mut rx) = hub.register(recipient, "anna".into()).unwrap();
        let (_other, mut other_rx) = hub.register(Uuid::new_v4(), "boris".into()).unwrap();

        let event = DomainEvent::new(
            None,
            EventPayload::Notification(NotificationEvent::Created {
                notification_id: Uuid::new_v4(),
                user_id: recipient,
                title: "New grade".into(),
                message: "You received a 9 in Algebra".into(),
                kind: "info".into(),
                created_at: Utc::now(),
            }),
        );
        bridge.publish(event).await;

        match rx.recv().await {
            Some(OutboundMessage::Notification { title, .. }) => {
                assert_eq!(title, "New grade");
            }
            other => panic!("unexpected frame: {other:?}"),
        }
        assert!(other_rx.try_recv().is_err());
    }
}
