//! Outbound ports consumed during event drain.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::Fault;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Toggle gating outward publication of order fulfillment messages.
pub const ORDER_FULFILLMENT: &str = "OrderFulfillment";

/// A message published to the external bus for other services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationEvent {
    pub id: Uuid,
    pub event_type: String,
    pub occurred_at: DateTime<Utc>,
    pub payload: Value,
}

impl IntegrationEvent {
    /// Creates a new integration event with a fresh id and timestamp.
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: event_type.into(),
            occurred_at: Utc::now(),
            payload,
        }
    }
}

/// Message-bus collaborator, called during event drain.
///
/// The transport behind it is external; the core only sees publish.
#[async_trait]
pub trait MessageBus: Send + Sync {
    async fn publish(&self, event: IntegrationEvent) -> Result<(), Fault>;
}

/// In-memory message bus for tests and local runs.
#[derive(Clone, Default)]
pub struct InMemoryMessageBus {
    published: Arc<RwLock<Vec<IntegrationEvent>>>,
}

impl InMemoryMessageBus {
    /// Creates a new empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all published events in publish order.
    pub async fn published(&self) -> Vec<IntegrationEvent> {
        self.published.read().await.clone()
    }

    /// Returns the number of published events.
    pub async fn count(&self) -> usize {
        self.published.read().await.len()
    }
}

#[async_trait]
impl MessageBus for InMemoryMessageBus {
    async fn publish(&self, event: IntegrationEvent) -> Result<(), Fault> {
        tracing::debug!(event_type = %event.event_type, "integration event published");
        self.published.write().await.push(event);
        Ok(())
    }
}

/// Feature-toggle collaborator, consulted synchronously at publish decision
/// points.
pub trait FeatureToggles: Send + Sync {
    fn is_enabled(&self, name: &str) -> bool;
}

/// Fixed toggle set resolved at startup from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticToggles {
    enabled: HashSet<String>,
}

impl StaticToggles {
    /// Creates a toggle set with everything disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set with the named toggle enabled.
    pub fn enable(mut self, name: impl Into<String>) -> Self {
        self.enabled.insert(name.into());
        self
    }

    /// Builds a toggle set from (name, enabled) pairs.
    pub fn from_flags<'a>(flags: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        let mut toggles = Self::new();
        for (name, enabled) in flags {
            if enabled {
                toggles.enabled.insert(name.to_string());
            }
        }
        toggles
    }
}

impl FeatureToggles for StaticToggles {
    fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }
}
