//! Handlers for order commands and queries.

use std::sync::Arc;

use async_trait::async_trait;
use common::Fault;
use mediator::RequestHandler;
use store::DocumentStore;

use crate::entity::Entity;
use crate::session::Session;

use super::commands::{
    CreateOrder, CreateOrderResult, DeleteOrder, DeleteOrderResult, UpdateOrder, UpdateOrderResult,
};
use super::model::{Order, OrderDto};
use super::queries::GetOrdersByCustomer;

/// Handles [`CreateOrder`].
pub struct CreateOrderHandler<S> {
    session: Arc<Session<S>>,
}

impl<S> CreateOrderHandler<S> {
    pub fn new(session: Arc<Session<S>>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl<S: DocumentStore> RequestHandler<CreateOrder> for CreateOrderHandler<S> {
    async fn handle(&self, command: CreateOrder) -> Result<CreateOrderResult, Fault> {
        let mut order = Order::place(
            command.customer_id,
            command.order_name,
            command.shipping_address,
            command.billing_address,
            command.items,
        );

        self.session.save(Order::COLLECTION, &mut order).await?;

        Ok(CreateOrderResult { id: order.id() })
    }
}

/// Handles [`UpdateOrder`].
pub struct UpdateOrderHandler<S> {
    session: Arc<Session<S>>,
}

impl<S> UpdateOrderHandler<S> {
    pub fn new(session: Arc<Session<S>>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl<S: DocumentStore> RequestHandler<UpdateOrder> for UpdateOrderHandler<S> {
    async fn handle(&self, command: UpdateOrder) -> Result<UpdateOrderResult, Fault> {
        let mut order: Order = self
            .session
            .load(Order::COLLECTION, command.id.as_uuid())
            .await?
            .ok_or_else(|| Fault::NotFound(format!("Order {} not found", command.id)))?;

        order.update(
            command.order_name,
            command.shipping_address,
            command.billing_address,
            command.status,
        );

        self.session.save(Order::COLLECTION, &mut order).await?;

        Ok(UpdateOrderResult { updated: true })
    }
}

/// Handles [`DeleteOrder`].
pub struct DeleteOrderHandler<S> {
    session: Arc<Session<S>>,
}

impl<S> DeleteOrderHandler<S> {
    pub fn new(session: Arc<Session<S>>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl<S: DocumentStore> RequestHandler<DeleteOrder> for DeleteOrderHandler<S> {
    async fn handle(&self, command: DeleteOrder) -> Result<DeleteOrderResult, Fault> {
        let deleted = self
            .session
            .delete(Order::COLLECTION, command.id.as_uuid())
            .await?;

        if !deleted {
            return Err(Fault::NotFound(format!("Order {} not found", command.id)));
        }

        Ok(DeleteOrderResult { deleted: true })
    }
}

/// Handles [`GetOrdersByCustomer`].
pub struct GetOrdersByCustomerHandler<S> {
    session: Arc<Session<S>>,
}

impl<S> GetOrdersByCustomerHandler<S> {
    pub fn new(session: Arc<Session<S>>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl<S: DocumentStore> RequestHandler<GetOrdersByCustomer> for GetOrdersByCustomerHandler<S> {
    async fn handle(&self, query: GetOrdersByCustomer) -> Result<Vec<OrderDto>, Fault> {
        let orders: Vec<Order> = self.session.list(Order::COLLECTION).await?;
        Ok(orders
            .iter()
            .filter(|order| order.customer_id() == query.customer_id)
            .map(Order::to_dto)
            .collect())
    }
}
