//! Handlers for product commands and queries.

use std::sync::Arc;

use async_trait::async_trait;
use common::Fault;
use mediator::RequestHandler;
use store::DocumentStore;

use crate::entity::Entity;
use crate::session::Session;

use super::commands::{
    CreateProduct, CreateProductResult, DeleteProduct, DeleteProductResult, UpdateProduct,
    UpdateProductResult,
};
use super::model::{Product, ProductDto};
use super::queries::{GetProductById, GetProducts, GetProductsByCategory};

/// Handles [`CreateProduct`].
pub struct CreateProductHandler<S> {
    session: Arc<Session<S>>,
}

impl<S> CreateProductHandler<S> {
    pub fn new(session: Arc<Session<S>>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl<S: DocumentStore> RequestHandler<CreateProduct> for CreateProductHandler<S> {
    async fn handle(&self, command: CreateProduct) -> Result<CreateProductResult, Fault> {
        let mut product = Product::new(
            command.name,
            command.category,
            command.description,
            command.image_file,
            command.price,
        );

        self.session.save(Product::COLLECTION, &mut product).await?;

        Ok(CreateProductResult { id: product.id() })
    }
}

/// Handles [`GetProductById`].
pub struct GetProductByIdHandler<S> {
    session: Arc<Session<S>>,
}

impl<S> GetProductByIdHandler<S> {
    pub fn new(session: Arc<Session<S>>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl<S: DocumentStore> RequestHandler<GetProductById> for GetProductByIdHandler<S> {
    async fn handle(&self, query: GetProductById) -> Result<ProductDto, Fault> {
        let product: Product = self
            .session
            .load(Product::COLLECTION, query.id.as_uuid())
            .await?
            .ok_or_else(|| Fault::NotFound(format!("Product {} not found", query.id)))?;

        Ok(product.to_dto())
    }
}

/// Handles [`GetProducts`].
pub struct GetProductsHandler<S> {
    session: Arc<Session<S>>,
}

impl<S> GetProductsHandler<S> {
    pub fn new(session: Arc<Session<S>>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl<S: DocumentStore> RequestHandler<GetProducts> for GetProductsHandler<S> {
    async fn handle(&self, _query: GetProducts) -> Result<Vec<ProductDto>, Fault> {
        let products: Vec<Product> = self.session.list(Product::COLLECTION).await?;
        Ok(products.iter().map(Product::to_dto).collect())
    }
}

/// Handles [`GetProductsByCategory`].
pub struct GetProductsByCategoryHandler<S> {
    session: Arc<Session<S>>,
}

impl<S> GetProductsByCategoryHandler<S> {
    pub fn new(session: Arc<Session<S>>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl<S: DocumentStore> RequestHandler<GetProductsByCategory> for GetProductsByCategoryHandler<S> {
    async fn handle(&self, query: GetProductsByCategory) -> Result<Vec<ProductDto>, Fault> {
        let products: Vec<Product> = self.session.list(Product::COLLECTION).await?;
        Ok(products
            .iter()
            .filter(|product| {
                product
                    .category()
                    .iter()
                    .any(|category| category.eq_ignore_ascii_case(&query.category))
            })
            .map(Product::to_dto)
            .collect())
    }
}

/// Handles [`UpdateProduct`].
pub struct UpdateProductHandler<S> {
    session: Arc<Session<S>>,
}

impl<S> UpdateProductHandler<S> {
    pub fn new(session: Arc<Session<S>>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl<S: DocumentStore> RequestHandler<UpdateProduct> for UpdateProductHandler<S> {
    async fn handle(&self, command: UpdateProduct) -> Result<UpdateProductResult, Fault> {
        let mut product: Product = self
            .session
            .load(Product::COLLECTION, command.id.as_uuid())
            .await?
            .ok_or_else(|| Fault::NotFound(format!("Product {} not found", command.id)))?;

        product.update_details(
            command.name,
            command.category,
            command.description,
            command.image_file,
            command.price,
        );

        self.session.save(Product::COLLECTION, &mut product).await?;

        Ok(UpdateProductResult { updated: true })
    }
}

/// Handles [`DeleteProduct`].
pub struct DeleteProductHandler<S> {
    session: Arc<Session<S>>,
}

impl<S> DeleteProductHandler<S> {
    pub fn new(session: Arc<Session<S>>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl<S: DocumentStore> RequestHandler<DeleteProduct> for DeleteProductHandler<S> {
    async fn handle(&self, command: DeleteProduct) -> Result<DeleteProductResult, Fault> {
        let deleted = self
            .session
            .delete(Product::COLLECTION, command.id.as_uuid())
            .await?;

        if !deleted {
            return Err(Fault::NotFound(format!("Product {} not found", command.id)));
        }

        Ok(DeleteProductResult { deleted: true })
    }
}
