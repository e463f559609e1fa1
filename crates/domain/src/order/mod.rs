//! Order slice: model, domain events, requests, validators, and handlers.

pub mod commands;
pub mod event_handlers;
pub mod events;
pub mod handlers;
pub mod model;
pub mod queries;
pub mod validators;

pub use commands::{
    CreateOrder, CreateOrderResult, DeleteOrder, DeleteOrderResult, UpdateOrder, UpdateOrderResult,
};
pub use event_handlers::{OrderCreatedEventHandler, OrderUpdatedEventHandler};
pub use events::{OrderCreated, OrderUpdated};
pub use handlers::{
    CreateOrderHandler, DeleteOrderHandler, GetOrdersByCustomerHandler, UpdateOrderHandler,
};
pub use model::{Address, Order, OrderDto, OrderItem, OrderStatus};
pub use queries::GetOrdersByCustomer;
pub use validators::{CreateOrderValidator, DeleteOrderValidator, UpdateOrderValidator};
