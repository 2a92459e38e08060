//! Handle for a single WebSocket connection.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::message::OutboundMessage;

/// A live WebSocket connection.
///
/// The handle owns the sending half of the outbound queue; the socket task
/// drains the receiving half. `try_send` never awaits, so publishers are
/// isolated from slow consumers: a full queue drops the frame, a closed
/// queue marks the connection dead so the pool can reap it.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique ID for this connection (a user may hold several).
    pub id: Uuid,
    /// The authenticated user.
    pub user_id: Uuid,
    /// The authenticated user's username, for logging.
    pub username: String,
    /// When the socket was accepted.
    pub connected_at: DateTime<Utc>,
    sender: mpsc::Sender<OutboundMessage>,
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a handle and the receiver the socket task should drain.
    pub fn new(
        user_id: Uuid,
        username: String,
        buffer_size: usize,
    ) -> (Arc<Self>, mpsc::Receiver<OutboundMessage>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let handle = Arc::new(Self {
            id: Uuid::new_v4(),
            user_id,
            username,
            connected_at: Utc::now(),
            sender,
            alive: AtomicBool::new(true),
        });
        (handle, receiver)
    }

    /// Queue a frame without blocking.
    ///
    /// Returns `true` if the frame was queued. A full buffer drops the
    /// frame and logs; a closed receiver marks the connection dead.
    pub fn try_send(&self, message: OutboundMessage) -> bool {
        match self.sender.try_send(message) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(
                    connection_id = %self.id,
                    username = %self.username,
                    "outbound buffer full, dropping frame"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.alive.store(false, Ordering::Release);
                false
            }
        }
    }

    /// Whether the socket task is still draining the queue.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Mark the connection dead (socket task exited).
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queued_frame_reaches_receiver() {
        let (handle, mut rx) = ConnectionHandle::new(Uuid::new_v4(), "petrov".into(), 4);
        assert!(handle.try_send(OutboundMessage::Pong));
        assert!(matches!(rx.recv().await, Some(OutboundMessage::Pong)));
    }

    #[tokio::test]
    async fn full_buffer_drops_without_blocking() {
        let (handle, _rx) = ConnectionHandle::new(Uuid::new_v4(), "petrov".into(), 1);
        assert!(handle.try_send(OutboundMessage::Pong));
        assert!(!handle.try_send(OutboundMessage::Pong));
        // A dropped frame does not kill the connection.
        assert!(handle.is_alive());
    }

    #[tokio::test]
    async fn closed_receiver_marks_connection_dead() {
        let (handle, rx) = ConnectionHandle::new(Uuid::new_v4(), "petrov".into(), 4);
        drop(rx);
        assert!(!handle.try_send(OutboundMessage::Pong));
        assert!(!handle.is_alive());
    }
}
