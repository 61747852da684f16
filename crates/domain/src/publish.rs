//! Domain event publication seam.
//!
//! The command core's obligation is exactly one published event per
//! successful transition, after persistence succeeds and never on failure.
//! Delivery beyond this trait (outbox, event store, broker) is an external
//! collaborator concern.

use async_trait::async_trait;
use thiserror::Error;

use crate::shopping_list::ShoppingListEvent;

/// Failure to hand an event to downstream delivery. Transient.
#[derive(Debug, Error)]
#[error("event publication failed: {0}")]
pub struct PublishError(pub String);

/// Publishes shopping list events for downstream consumers (bot dispatch,
/// order status projections).
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes a single domain event.
    async fn publish(&self, event: ShoppingListEvent) -> Result<(), PublishError>;
}

/// Publisher that emits events to the structured log. Used when no broker
/// is wired in, e.g. the standalone API server.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventPublisher;

impl LoggingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: ShoppingListEvent) -> Result<(), PublishError> {
        tracing::info!(
            event_type = event.event_type(),
            shopping_list_id = %event.shopping_list_id(),
            "domain event published"
        );
        Ok(())
    }
}
