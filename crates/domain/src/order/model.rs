//! Order aggregate and its value objects.

use common::{CustomerId, OrderId, ProductId};
use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateRoot, EventBuffer};
use crate::entity::{AuditInfo, Entity};

use super::events::{OrderCreated, OrderUpdated};

/// Postal address captured with an order.
///
/// All fields are optional on the wire; absent fields deserialize empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub address_line: String,
    pub country: String,
    pub state: String,
    pub zip_code: String,
}

/// A line item in an order. Prices are integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: i64,
}

impl OrderItem {
    pub fn new(product_id: ProductId, quantity: u32, price: i64) -> Self {
        Self {
            product_id,
            quantity,
            price,
        }
    }
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Draft,
    Pending,
    Completed,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::Draft => "Draft",
            OrderStatus::Pending => "Pending",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        };
        write!(f, "{name}")
    }
}

/// Order aggregate root.
///
/// Mutating operations buffer domain events; the commit session drains and
/// publishes them after a successful save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    order_name: String,
    shipping_address: Address,
    billing_address: Address,
    items: Vec<OrderItem>,
    status: OrderStatus,
    audit: AuditInfo,
    #[serde(skip)]
    events: EventBuffer,
}

impl Order {
    /// Store collection holding order documents.
    pub const COLLECTION: &'static str = "orders";

    /// Places a new order, raising [`OrderCreated`].
    pub fn place(
        customer_id: CustomerId,
        order_name: impl Into<String>,
        shipping_address: Address,
        billing_address: Address,
        items: Vec<OrderItem>,
    ) -> Self {
        let mut order = Self {
            id: OrderId::new(),
            customer_id,
            order_name: order_name.into(),
            shipping_address,
            billing_address,
            items,
            status: OrderStatus::Pending,
            audit: AuditInfo::default(),
            events: EventBuffer::new(),
        };

        let event = OrderCreated {
            order: order.to_dto(),
        };
        order.events.record(event);
        order
    }

    /// Rewrites the order's mutable fields, raising [`OrderUpdated`].
    pub fn update(
        &mut self,
        order_name: impl Into<String>,
        shipping_address: Address,
        billing_address: Address,
        status: OrderStatus,
    ) {
        self.order_name = order_name.into();
        self.shipping_address = shipping_address;
        self.billing_address = billing_address;
        self.status = status;

        let event = OrderUpdated {
            order: self.to_dto(),
        };
        self.events.record(event);
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn order_name(&self) -> &str {
        &self.order_name
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the order total in cents.
    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.price * i64::from(item.quantity))
            .sum()
    }

    /// Returns the wire representation of this order.
    pub fn to_dto(&self) -> OrderDto {
        OrderDto {
            id: self.id,
            customer_id: self.customer_id,
            order_name: self.order_name.clone(),
            shipping_address: self.shipping_address.clone(),
            billing_address: self.billing_address.clone(),
            items: self.items.clone(),
            status: self.status,
            total: self.total(),
        }
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }

    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }
}

impl AggregateRoot for Order {
    fn events(&self) -> &EventBuffer {
        &self.events
    }

    fn events_mut(&mut self) -> &mut EventBuffer {
        &mut self.events
    }
}

/// Wire representation of an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub order_name: String,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub total: i64,
}
