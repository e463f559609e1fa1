//! Product catalog endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::Json;
use common::ProductId;
use domain::product::{
    CreateProduct, CreateProductResult, DeleteProduct, DeleteProductResult, GetProductById,
    GetProducts, GetProductsByCategory, ProductDto, UpdateProduct, UpdateProductResult,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

// -- Request types --

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CreateProductRequest {
    pub name: String,
    pub category: Vec<String>,
    pub description: String,
    pub image_file: String,
    /// Price in cents.
    pub price: i64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct UpdateProductRequest {
    pub id: Uuid,
    pub name: String,
    pub category: Vec<String>,
    pub description: String,
    pub image_file: String,
    pub price: i64,
}

// -- Handlers --

/// POST /products — add a product to the catalog.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<CreateProductResult>), ApiError> {
    let command = CreateProduct {
        name: req.name,
        category: req.category,
        description: req.description,
        image_file: req.image_file,
        price: req.price,
    };

    let result = state
        .dispatcher
        .send(command)
        .await
        .map_err(|fault| ApiError::new(fault, uri.path()))?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /products — list the full catalog.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Json<Vec<ProductDto>>, ApiError> {
    let products = state
        .dispatcher
        .send(GetProducts)
        .await
        .map_err(|fault| ApiError::new(fault, uri.path()))?;

    Ok(Json(products))
}

/// GET /products/{id} — load a product by id.
#[tracing::instrument(skip(state))]
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductDto>, ApiError> {
    let product = state
        .dispatcher
        .send(GetProductById {
            id: ProductId::from_uuid(id),
        })
        .await
        .map_err(|fault| ApiError::new(fault, uri.path()))?;

    Ok(Json(product))
}

/// GET /products/category/{category} — list products in a category.
#[tracing::instrument(skip(state))]
pub async fn by_category(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Path(category): Path<String>,
) -> Result<Json<Vec<ProductDto>>, ApiError> {
    let products = state
        .dispatcher
        .send(GetProductsByCategory { category })
        .await
        .map_err(|fault| ApiError::new(fault, uri.path()))?;

    Ok(Json(products))
}

/// PUT /products — replace a product's catalog details.
#[tracing::instrument(skip(state, req))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<UpdateProductResult>, ApiError> {
    let command = UpdateProduct {
        id: ProductId::from_uuid(req.id),
        name: req.name,
        category: req.category,
        description: req.description,
        image_file: req.image_file,
        price: req.price,
    };

    let result = state
        .dispatcher
        .send(command)
        .await
        .map_err(|fault| ApiError::new(fault, uri.path()))?;

    Ok(Json(result))
}

/// DELETE /products/{id} — remove a product from the catalog.
#[tracing::instrument(skip(state))]
pub async fn remove(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteProductResult>, ApiError> {
    let result = state
        .dispatcher
        .send(DeleteProduct {
            id: ProductId::from_uuid(id),
        })
        .await
        .map_err(|fault| ApiError::new(fault, uri.path()))?;

    Ok(Json(result))
}
