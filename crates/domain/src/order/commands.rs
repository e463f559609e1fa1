//! Order commands.

use common::{CustomerId, OrderId};
use mediator::{Command, Request};
use serde::Serialize;

use super::model::{Address, OrderItem, OrderStatus};

/// Command to place a new order.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub customer_id: CustomerId,
    pub order_name: String,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub items: Vec<OrderItem>,
}

impl Request for CreateOrder {
    type Response = CreateOrderResult;
    const NAME: &'static str = "CreateOrder";
}

impl Command for CreateOrder {}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderResult {
    pub id: OrderId,
}

/// Command to rewrite an order's details.
#[derive(Debug, Clone)]
pub struct UpdateOrder {
    pub id: OrderId,
    pub order_name: String,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub status: OrderStatus,
}

impl Request for UpdateOrder {
    type Response = UpdateOrderResult;
    const NAME: &'static str = "UpdateOrder";
}

impl Command for UpdateOrder {}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateOrderResult {
    pub updated: bool,
}

/// Command to delete an order.
#[derive(Debug, Clone)]
pub struct DeleteOrder {
    pub id: OrderId,
}

impl Request for DeleteOrder {
    type Response = DeleteOrderResult;
    const NAME: &'static str = "DeleteOrder";
}

impl Command for DeleteOrder {}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteOrderResult {
    pub deleted: bool,
}
