//! Validation rules for product commands.

use async_trait::async_trait;
use mediator::{FieldFailure, Validator};

use super::commands::{CreateProduct, DeleteProduct, UpdateProduct};

/// Rules for [`CreateProduct`].
pub struct CreateProductValidator;

#[async_trait]
impl Validator<CreateProduct> for CreateProductValidator {
    async fn validate(&self, command: &CreateProduct) -> Vec<FieldFailure> {
        let mut failures = Vec::new();
        if command.name.trim().is_empty() {
            failures.push(FieldFailure::new("Name", "Name is required"));
        }
        if command.category.is_empty() {
            failures.push(FieldFailure::new("Category", "Category is required"));
        }
        if command.image_file.trim().is_empty() {
            failures.push(FieldFailure::new("ImageFile", "ImageFile is required"));
        }
        if command.price <= 0 {
            failures.push(FieldFailure::new("Price", "Price must be greater than 0"));
        }
        failures
    }
}

/// Rules for [`UpdateProduct`].
pub struct UpdateProductValidator;

#[async_trait]
impl Validator<UpdateProduct> for UpdateProductValidator {
    async fn validate(&self, command: &UpdateProduct) -> Vec<FieldFailure> {
        let mut failures = Vec::new();
        if command.id.is_nil() {
            failures.push(FieldFailure::new("Id", "Id is required"));
        }
        if command.name.trim().is_empty() {
            failures.push(FieldFailure::new("Name", "Name is required"));
        }
        if command.price <= 0 {
            failures.push(FieldFailure::new("Price", "Price must be greater than 0"));
        }
        failures
    }
}

/// Rules for [`DeleteProduct`].
pub struct DeleteProductValidator;

#[async_trait]
impl Validator<DeleteProduct> for DeleteProductValidator {
    async fn validate(&self, command: &DeleteProduct) -> Vec<FieldFailure> {
        if command.id.is_nil() {
            vec![FieldFailure::new("Id", "Id is required")]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateProduct {
        CreateProduct {
            name: "Widget".to_string(),
            category: vec!["tools".to_string()],
            description: String::new(),
            image_file: "widget.png".to_string(),
            price: 999,
        }
    }

    #[tokio::test]
    async fn valid_create_command_passes() {
        let failures = CreateProductValidator.validate(&valid_create()).await;
        assert!(failures.is_empty());
    }

    #[tokio::test]
    async fn missing_name_is_reported_first() {
        let command = CreateProduct {
            name: String::new(),
            price: 0,
            ..valid_create()
        };

        let failures = CreateProductValidator.validate(&command).await;
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].field, "Name");
        assert_eq!(failures[1].field, "Price");
    }

    #[tokio::test]
    async fn zero_price_fails() {
        let command = CreateProduct {
            price: 0,
            ..valid_create()
        };

        let failures = CreateProductValidator.validate(&command).await;
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field, "Price");
        assert_eq!(failures[0].message, "Price must be greater than 0");
    }

    #[tokio::test]
    async fn delete_requires_a_real_id() {
        let failures = DeleteProductValidator
            .validate(&DeleteProduct {
                id: common::ProductId::from_uuid(uuid::Uuid::nil()),
            })
            .await;
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field, "Id");
    }
}
