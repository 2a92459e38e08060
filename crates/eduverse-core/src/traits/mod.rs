//! Trait seams between crates.

pub mod publisher;

pub use publisher::EventPublisher;
