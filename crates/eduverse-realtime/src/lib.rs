//! Real-time layer: WebSocket connections, chat rooms and live fan-out.
//!
//! The HTTP layer hands each upgraded socket to the [`RealtimeHub`], which
//! registers a [`ConnectionHandle`] and routes inbound frames. Services
//! publish [`eduverse_core::events::DomainEvent`]s through the
//! [`EventBridge`], which turns them into outbound frames for the right
//! rooms and users. Delivery is best-effort: a slow or dead socket never
//! blocks a publisher.

pub mod bridge;
pub mod channel;
pub mod connection;
pub mod guard;
pub mod hub;
pub mod message;

pub use bridge::EventBridge;
pub use channel::ChannelRegistry;
pub use connection::{ConnectionHandle, ConnectionPool};
pub use guard::{ParticipantGuard, RoomAuthorizer};
pub use hub::RealtimeHub;
pub use message::{InboundMessage, OutboundMessage};
