//! Validation rules for order commands.

use async_trait::async_trait;
use mediator::{FieldFailure, Validator};

use super::commands::{CreateOrder, DeleteOrder, UpdateOrder};

/// Rules for [`CreateOrder`].
pub struct CreateOrderValidator;

#[async_trait]
impl Validator<CreateOrder> for CreateOrderValidator {
    async fn validate(&self, command: &CreateOrder) -> Vec<FieldFailure> {
        let mut failures = Vec::new();
        if command.order_name.trim().is_empty() {
            failures.push(FieldFailure::new("Name", "Name is required"));
        }
        if command.customer_id.is_nil() {
            failures.push(FieldFailure::new("CustomerId", "CustomerId is required"));
        }
        if command.items.is_empty() {
            failures.push(FieldFailure::new("OrderItems", "OrderItems should not be empty"));
        }
        failures
    }
}

/// Rules for [`UpdateOrder`].
pub struct UpdateOrderValidator;

#[async_trait]
impl Validator<UpdateOrder> for UpdateOrderValidator {
    async fn validate(&self, command: &UpdateOrder) -> Vec<FieldFailure> {
        let mut failures = Vec::new();
        if command.id.is_nil() {
            failures.push(FieldFailure::new("Id", "Id is required"));
        }
        if command.order_name.trim().is_empty() {
            failures.push(FieldFailure::new("Name", "Name is required"));
        }
        failures
    }
}

/// Rules for [`DeleteOrder`].
pub struct DeleteOrderValidator;

#[async_trait]
impl Validator<DeleteOrder> for DeleteOrderValidator {
    async fn validate(&self, command: &DeleteOrder) -> Vec<FieldFailure> {
        if command.id.is_nil() {
            vec![FieldFailure::new("Id", "Id is required")]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use common::{CustomerId, OrderId, ProductId};
    use uuid::Uuid;

    use super::*;
    use crate::order::model::{Address, OrderItem};

    fn valid_create() -> CreateOrder {
        CreateOrder {
            customer_id: CustomerId::new(),
            order_name: "ORD-1".to_string(),
            shipping_address: Address::default(),
            billing_address: Address::default(),
            items: vec![OrderItem::new(ProductId::new(), 1, 1000)],
        }
    }

    #[tokio::test]
    async fn valid_create_command_passes() {
        assert!(CreateOrderValidator.validate(&valid_create()).await.is_empty());
    }

    #[tokio::test]
    async fn missing_customer_and_items_both_fail() {
        let command = CreateOrder {
            customer_id: CustomerId::from_uuid(Uuid::nil()),
            items: Vec::new(),
            ..valid_create()
        };

        let failures = CreateOrderValidator.validate(&command).await;
        let fields: Vec<_> = failures.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["CustomerId", "OrderItems"]);
    }

    #[tokio::test]
    async fn update_requires_id_and_name() {
        let command = UpdateOrder {
            id: OrderId::from_uuid(Uuid::nil()),
            order_name: String::new(),
            shipping_address: Address::default(),
            billing_address: Address::default(),
            status: crate::order::model::OrderStatus::Pending,
        };

        let failures = UpdateOrderValidator.validate(&command).await;
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].field, "Id");
        assert_eq!(failures[1].field, "Name");
    }
}
