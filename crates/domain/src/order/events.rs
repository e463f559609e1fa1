//! Order domain events.

use mediator::Notification;
use serde::Serialize;

use crate::aggregate::DomainEvent;

use super::model::OrderDto;

/// Raised when an order is placed.
#[derive(Debug, Clone, Serialize)]
pub struct OrderCreated {
    pub order: OrderDto,
}

impl Notification for OrderCreated {
    fn name(&self) -> &'static str {
        "OrderCreated"
    }
}

impl DomainEvent for OrderCreated {}

/// Raised when an order's details or status change.
#[derive(Debug, Clone, Serialize)]
pub struct OrderUpdated {
    pub order: OrderDto,
}

impl Notification for OrderUpdated {
    fn name(&self) -> &'static str {
        "OrderUpdated"
    }
}

impl DomainEvent for OrderUpdated {}
