//! Event publisher seam.
//!
//! Services publish domain events without depending on the real-time crate;
//! the real-time engine implements this trait and maps events onto rooms.

use async_trait::async_trait;

use crate::events::DomainEvent;

/// Publishes domain events to interested consumers.
///
/// Publishing is fire-and-forget from the caller's point of view: delivery
/// failures are logged by the implementation, never surfaced to the request
/// that triggered the event. The durable write always happens before
/// `publish` is called.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single domain event.
    async fn publish(&self, event: DomainEvent);
}

/// A publisher that drops every event. Used in tests and tooling.
#[derive(Debug, Clone, Default)]
pub struct NoopPublisher;

#[async_trait]
impl EventPublisher for NoopPublisher {
    async fn publish(&self, _event: DomainEvent) {}
}
