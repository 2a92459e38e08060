//! Chat domain entities.

pub mod message;
pub mod model;
pub mod participant;

pub use message::{ChatMessage, MessageType};
pub use model::{Chat, ChatType, CreateChat};
pub use participant::{ChatParticipant, ParticipantRole};
