//! Domain-event handlers for the order slice.

use std::sync::Arc;

use async_trait::async_trait;
use common::Fault;
use mediator::{Notification, NotificationHandler};

use crate::ports::{FeatureToggles, IntegrationEvent, MessageBus, ORDER_FULFILLMENT};

use super::events::{OrderCreated, OrderUpdated};

/// Forwards created orders to the message bus when fulfillment is enabled.
///
/// The toggle is read here, at publish time; it is never cached when the
/// event is raised.
pub struct OrderCreatedEventHandler<B> {
    bus: Arc<B>,
    toggles: Arc<dyn FeatureToggles>,
}

impl<B> OrderCreatedEventHandler<B> {
    pub fn new(bus: Arc<B>, toggles: Arc<dyn FeatureToggles>) -> Self {
        Self { bus, toggles }
    }
}

#[async_trait]
impl<B: MessageBus> NotificationHandler<OrderCreated> for OrderCreatedEventHandler<B> {
    async fn handle(&self, event: &OrderCreated) -> Result<(), Fault> {
        tracing::info!(event = event.name(), order_id = %event.order.id, "domain event handled");

        if self.toggles.is_enabled(ORDER_FULFILLMENT) {
            let payload = serde_json::to_value(&event.order)?;
            self.bus
                .publish(IntegrationEvent::new(event.name(), payload))
                .await?;
        }

        Ok(())
    }
}

/// Logs updated orders; no outward message is sent for updates.
#[derive(Debug, Default)]
pub struct OrderUpdatedEventHandler;

#[async_trait]
impl NotificationHandler<OrderUpdated> for OrderUpdatedEventHandler {
    async fn handle(&self, event: &OrderUpdated) -> Result<(), Fault> {
        tracing::info!(event = event.name(), order_id = %event.order.id, "domain event handled");
        Ok(())
    }
}
