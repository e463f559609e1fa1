//! Product catalog slice: model, requests, validators, and handlers.

pub mod commands;
pub mod handlers;
pub mod model;
pub mod queries;
pub mod validators;

pub use commands::{
    CreateProduct, CreateProductResult, DeleteProduct, DeleteProductResult, UpdateProduct,
    UpdateProductResult,
};
pub use handlers::{
    CreateProductHandler, DeleteProductHandler, GetProductByIdHandler, GetProductsByCategoryHandler,
    GetProductsHandler, UpdateProductHandler,
};
pub use model::{Product, ProductDto};
pub use queries::{GetProductById, GetProducts, GetProductsByCategory};
pub use validators::{CreateProductValidator, DeleteProductValidator, UpdateProductValidator};
