//! Shared leaf types for the storefront services.
//!
//! This crate holds the typed identifiers used across the domain and the
//! error taxonomy every failure is normalized into before it reaches the
//! wire. It has no knowledge of HTTP, persistence, or the dispatch pipeline.

pub mod error;
pub mod ids;

pub use error::{ErrorCode, ErrorKind, ErrorRecord, ErrorType, Fault};
pub use ids::{CustomerId, OrderId, ProductId};
