//! Request dispatch pipeline for the storefront services.
//!
//! This crate provides the shared mediation core:
//! - Request, Command, and Query traits for typed request objects
//! - RequestHandler trait binding each request kind to exactly one handler
//! - Dispatcher with a startup-validated registration table
//! - Behavior chain for cross-cutting concerns (validation, logging)
//! - Validator registry consulted before any handler runs
//! - Notification publisher fanning domain events out to their handlers

pub mod behavior;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod notify;
pub mod request;
pub mod validate;

pub use behavior::{Behavior, LoggingBehavior, Next, Outcome, RequestEnvelope};
pub use dispatch::{Dispatcher, DispatcherBuilder};
pub use error::RegistryError;
pub use handler::RequestHandler;
pub use notify::{EventPublisher, EventPublisherBuilder, Notification, NotificationHandler};
pub use request::{Command, Query, Request};
pub use validate::{FieldFailure, ValidationBehavior, Validator, ValidatorRegistry};
