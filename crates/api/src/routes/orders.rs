//! Order endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::Json;
use common::{CustomerId, OrderId, ProductId};
use domain::order::{
    Address, CreateOrder, CreateOrderResult, DeleteOrder, DeleteOrderResult, GetOrdersByCustomer,
    OrderDto, OrderItem, OrderStatus, UpdateOrder, UpdateOrderResult,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

// -- Request types --

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    pub quantity: u32,
    /// Unit price in cents.
    pub price: i64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CreateOrderRequest {
    pub customer_id: Option<Uuid>,
    pub order_name: String,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct UpdateOrderRequest {
    pub id: Uuid,
    pub order_name: String,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub status: OrderStatus,
}

fn to_items(items: Vec<OrderItemRequest>) -> Vec<OrderItem> {
    items
        .into_iter()
        .map(|item| OrderItem::new(ProductId::from_uuid(item.product_id), item.quantity, item.price))
        .collect()
}

// -- Handlers --

/// POST /orders — place a new order.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResult>), ApiError> {
    let command = CreateOrder {
        customer_id: CustomerId::from_uuid(req.customer_id.unwrap_or_default()),
        order_name: req.order_name,
        shipping_address: req.shipping_address,
        billing_address: req.billing_address,
        items: to_items(req.items),
    };

    let result = state
        .dispatcher
        .send(command)
        .await
        .map_err(|fault| ApiError::new(fault, uri.path()))?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// PUT /orders — rewrite an order's details.
#[tracing::instrument(skip(state, req))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Json(req): Json<UpdateOrderRequest>,
) -> Result<Json<UpdateOrderResult>, ApiError> {
    let command = UpdateOrder {
        id: OrderId::from_uuid(req.id),
        order_name: req.order_name,
        shipping_address: req.shipping_address,
        billing_address: req.billing_address,
        status: req.status,
    };

    let result = state
        .dispatcher
        .send(command)
        .await
        .map_err(|fault| ApiError::new(fault, uri.path()))?;

    Ok(Json(result))
}

/// DELETE /orders/{id} — delete an order.
#[tracing::instrument(skip(state))]
pub async fn remove(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteOrderResult>, ApiError> {
    let result = state
        .dispatcher
        .send(DeleteOrder {
            id: OrderId::from_uuid(id),
        })
        .await
        .map_err(|fault| ApiError::new(fault, uri.path()))?;

    Ok(Json(result))
}

/// GET /orders/customer/{customer_id} — list a customer's orders.
#[tracing::instrument(skip(state))]
pub async fn by_customer(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<Vec<OrderDto>>, ApiError> {
    let orders = state
        .dispatcher
        .send(GetOrdersByCustomer {
            customer_id: CustomerId::from_uuid(customer_id),
        })
        .await
        .map_err(|fault| ApiError::new(fault, uri.path()))?;

    Ok(Json(orders))
}
