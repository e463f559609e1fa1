//! Domain layer for the storefront services.
//!
//! This crate provides:
//! - Entity and aggregate primitives with audit metadata and buffered
//!   domain events
//! - The commit session that stamps audit fields, persists, and publishes
//!   drained events
//! - The product and order slices: models, commands, queries, validators,
//!   and handlers
//! - Outbound ports (message bus, feature toggles) with in-memory
//!   implementations for tests and local runs

pub mod aggregate;
pub mod entity;
pub mod order;
pub mod ports;
pub mod product;
pub mod session;

pub use aggregate::{AggregateRoot, DomainEvent, EventBuffer};
pub use entity::{AuditInfo, Entity};
pub use ports::{
    FeatureToggles, InMemoryMessageBus, IntegrationEvent, MessageBus, StaticToggles,
    ORDER_FULFILLMENT,
};
pub use session::Session;
