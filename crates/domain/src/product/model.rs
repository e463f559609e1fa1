//! Product catalog entry.

use common::ProductId;
use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateRoot, EventBuffer};
use crate::entity::{AuditInfo, Entity};

/// A product in the catalog.
///
/// Prices are integer cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category: Vec<String>,
    description: String,
    image_file: String,
    price: i64,
    audit: AuditInfo,
    #[serde(skip)]
    events: EventBuffer,
}

impl Product {
    /// Store collection holding product documents.
    pub const COLLECTION: &'static str = "products";

    /// Creates a new product with a fresh id.
    pub fn new(
        name: impl Into<String>,
        category: Vec<String>,
        description: impl Into<String>,
        image_file: impl Into<String>,
        price: i64,
    ) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            category,
            description: description.into(),
            image_file: image_file.into(),
            price,
            audit: AuditInfo::default(),
            events: EventBuffer::new(),
        }
    }

    /// Replaces the product's catalog details.
    pub fn update_details(
        &mut self,
        name: impl Into<String>,
        category: Vec<String>,
        description: impl Into<String>,
        image_file: impl Into<String>,
        price: i64,
    ) {
        self.name = name.into();
        self.category = category;
        self.description = description.into();
        self.image_file = image_file.into();
        self.price = price;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &[String] {
        &self.category
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    /// Returns the wire representation of this product.
    pub fn to_dto(&self) -> ProductDto {
        ProductDto {
            id: self.id,
            name: self.name.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            image_file: self.image_file.clone(),
            price: self.price,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }

    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }
}

impl AggregateRoot for Product {
    fn events(&self) -> &EventBuffer {
        &self.events
    }

    fn events_mut(&mut self) -> &mut EventBuffer {
        &mut self.events
    }
}

/// Wire representation of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: ProductId,
    pub name: String,
    pub category: Vec<String>,
    pub description: String,
    pub image_file: String,
    pub price: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_products_have_no_audit_stamps() {
        let product = Product::new("Widget", vec!["tools".to_string()], "", "widget.png", 999);
        assert!(product.audit().created_at.is_none());
        assert!(product.events().is_empty());
    }

    #[test]
    fn update_details_replaces_fields() {
        let mut product = Product::new("Widget", vec!["tools".to_string()], "", "widget.png", 999);
        product.update_details("Gadget", vec!["toys".to_string()], "new", "gadget.png", 1500);

        assert_eq!(product.name(), "Gadget");
        assert_eq!(product.category(), ["toys".to_string()]);
        assert_eq!(product.price(), 1500);
    }

    #[test]
    fn dto_mirrors_the_product() {
        let product = Product::new("Widget", vec!["tools".to_string()], "desc", "w.png", 999);
        let dto = product.to_dto();

        assert_eq!(dto.id, product.id());
        assert_eq!(dto.name, "Widget");
        assert_eq!(dto.price, 999);
    }
}
