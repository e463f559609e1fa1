//! Product commands.

use common::ProductId;
use mediator::{Command, Request};
use serde::Serialize;

/// Command to add a product to the catalog.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub category: Vec<String>,
    pub description: String,
    pub image_file: String,
    /// Price in cents.
    pub price: i64,
}

impl Request for CreateProduct {
    type Response = CreateProductResult;
    const NAME: &'static str = "CreateProduct";
}

impl Command for CreateProduct {}

#[derive(Debug, Clone, Serialize)]
pub struct CreateProductResult {
    pub id: ProductId,
}

/// Command to replace a product's catalog details.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub id: ProductId,
    pub name: String,
    pub category: Vec<String>,
    pub description: String,
    pub image_file: String,
    pub price: i64,
}

impl Request for UpdateProduct {
    type Response = UpdateProductResult;
    const NAME: &'static str = "UpdateProduct";
}

impl Command for UpdateProduct {}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateProductResult {
    pub updated: bool,
}

/// Command to remove a product from the catalog.
#[derive(Debug, Clone)]
pub struct DeleteProduct {
    pub id: ProductId,
}

impl Request for DeleteProduct {
    type Response = DeleteProductResult;
    const NAME: &'static str = "DeleteProduct";
}

impl Command for DeleteProduct {}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteProductResult {
    pub deleted: bool,
}
