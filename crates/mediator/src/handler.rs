//! Handler trait binding request kinds to their single handler.

use async_trait::async_trait;
use common::Fault;

use crate::request::Request;

/// Handles one request kind, producing its declared response type.
///
/// Failures are returned by value; handlers never serialize errors or decide
/// HTTP statuses themselves.
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    async fn handle(&self, request: R) -> Result<R::Response, Fault>;
}
