//! Order queries.

use common::CustomerId;
use mediator::{Query, Request};

use super::model::OrderDto;

/// Query for every order placed by a customer.
#[derive(Debug, Clone)]
pub struct GetOrdersByCustomer {
    pub customer_id: CustomerId,
}

impl Request for GetOrdersByCustomer {
    type Response = Vec<OrderDto>;
    const NAME: &'static str = "GetOrdersByCustomer";
}

impl Query for GetOrdersByCustomer {}
