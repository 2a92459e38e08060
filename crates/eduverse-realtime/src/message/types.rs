//! Wire-level WebSocket message types.
//!
//! Both directions use externally tagged JSON with snake_case tags, e.g.
//! `{"type":"join","chat_id":"..."}`. Clients only ever send room control
//! frames; messages themselves go through the HTTP API so they are durable
//! before anyone sees them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eduverse_core::events::{ChatEvent, NotificationEvent};

/// Frames a client may send over the socket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Subscribe to a chat room's live events.
    Join {
        /// The chat to join.
        chat_id: Uuid,
    },
    /// Unsubscribe from a chat room.
    Leave {
        /// The chat to leave.
        chat_id: Uuid,
    },
    /// Liveness probe; answered with [`OutboundMessage::Pong`].
    Ping,
}

/// Frames the server pushes to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Acknowledges a successful [`InboundMessage::Join`].
    Joined { chat_id: Uuid },
    /// Acknowledges an [`InboundMessage::Leave`].
    Left { chat_id: Uuid },
    /// Answer to [`InboundMessage::Ping`].
    Pong,
    /// A new message in a subscribed chat.
    ChatMessage {
        chat_id: Uuid,
        message_id: Uuid,
        sender_id: Uuid,
        sender_name: String,
        content: String,
        reply_to: Option<Uuid>,
        sent_at: DateTime<Utc>,
    },
    /// A message in a subscribed chat was edited.
    MessageEdited {
        chat_id: Uuid,
        message_id: Uuid,
        content: String,
    },
    /// A message in a subscribed chat was deleted.
    MessageDeleted { chat_id: Uuid, message_id: Uuid },
    /// Someone joined a subscribed chat.
    ParticipantAdded {
        chat_id: Uuid,
        user_id: Uuid,
        username: String,
    },
    /// Someone left a subscribed chat.
    ParticipantRemoved { chat_id: Uuid, user_id: Uuid },
    /// A notification addressed to this user.
    Notification {
        notification_id: Uuid,
        title: String,
        message: String,
        kind: String,
        created_at: DateTime<Utc>,
    },
    /// An inbound frame was rejected.
    Error { message: String },
}

impl OutboundMessage {
    /// Build the frame broadcast to a chat room for a chat event.
    pub fn from_chat_event(event: &ChatEvent) -> Self {
        match event {
            ChatEvent::MessageSent {
                chat_id,
                message_id,
                sender_id,
                sender_name,
                content,
                reply_to,
                sent_at,
            } => Self::ChatMessage {
                chat_id: *chat_id,
                message_id: *message_id,
                sender_id: *sender_id,
                sender_name: sender_name.clone(),
                content: content.clone(),
                reply_to: *reply_to,
                sent_at: *sent_at,
            },
            ChatEvent::MessageEdited {
                chat_id,
                message_id,
                content,
            } => Self::MessageEdited {
                chat_id: *chat_id,
                message_id: *message_id,
                content: content.clone(),
            },
            ChatEvent::MessageDeleted {
                chat_id,
                message_id,
            } => Self::MessageDeleted {
                chat_id: *chat_id,
                message_id: *message_id,
            },
            ChatEvent::ParticipantAdded {
                chat_id,
                user_id,
                username,
            } => Self::ParticipantAdded {
                chat_id: *chat_id,
                user_id: *user_id,
                username: username.clone(),
            },
            ChatEvent::ParticipantRemoved { chat_id, user_id } => Self::ParticipantRemoved {
                chat_id: *chat_id,
                user_id: *user_id,
            },
        }
    }

    /// Build the frame pushed to a user's connections for a notification event.
    pub fn from_notification_event(event: &NotificationEvent) -> Self {
        match event {
            NotificationEvent::Created {
                notification_id,
                title,
                message,
                kind,
                created_at,
                ..
            } => Self::Notification {
                notification_id: *notification_id,
                title: title.clone(),
                message: message.clone(),
                kind: kind.clone(),
                created_at: *created_at,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_join_parses_from_tagged_json() {
        let chat_id = Uuid::new_v4();
        let json = format!(r#"{{"type":"join","chat_id":"{chat_id}"}}"#);
        let parsed: InboundMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, InboundMessage::Join { chat_id });
    }

    #[test]
    fn inbound_ping_parses() {
        let parsed: InboundMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert_eq!(parsed, InboundMessage::Ping);
    }

    #[test]
    fn unknown_inbound_type_is_rejected() {
        let result: Result<InboundMessage, _> =
            serde_json::from_str(r#"{"type":"send_message","content":"hi"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn outbound_frames_carry_snake_case_tags() {
        let frame = OutboundMessage::Joined {
            chat_id: Uuid::new_v4(),
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["type"], "joined");

        let frame = OutboundMessage::Error {
            message: "not a participant".into(),
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["type"], "error");
    }

    #[test]
    fn chat_event_maps_to_chat_message_frame() {
        let chat_id = Uuid::new_v4();
        let event = ChatEvent::MessageSent {
            chat_id,
            message_id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            sender_name: "ivanov".into(),
            content: "hello".into(),
            reply_to: None,
            sent_at: Utc::now(),
        };
        match OutboundMessage::from_chat_event(&event) {
            OutboundMessage::ChatMessage {
                chat_id: id,
                sender_name,
                ..
            } => {
                assert_eq!(id, chat_id);
                assert_eq!(sender_name, "ivanov");
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }
}
