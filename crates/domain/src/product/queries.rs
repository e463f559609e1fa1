//! Product queries.

use common::ProductId;
use mediator::{Query, Request};

use super::model::ProductDto;

/// Query for a single product by id.
#[derive(Debug, Clone)]
pub struct GetProductById {
    pub id: ProductId,
}

impl Request for GetProductById {
    type Response = ProductDto;
    const NAME: &'static str = "GetProductById";
}

impl Query for GetProductById {}

/// Query for the full catalog.
#[derive(Debug, Clone, Default)]
pub struct GetProducts;

impl Request for GetProducts {
    type Response = Vec<ProductDto>;
    const NAME: &'static str = "GetProducts";
}

impl Query for GetProducts {}

/// Query for every product carrying the given category.
#[derive(Debug, Clone)]
pub struct GetProductsByCategory {
    pub category: String,
}

impl Request for GetProductsByCategory {
    type Response = Vec<ProductDto>;
    const NAME: &'static str = "GetProductsByCategory";
}

impl Query for GetProductsByCategory {}
