//! Composable behaviors wrapping handler execution.

use std::any::Any;
use std::time::Instant;

use async_trait::async_trait;
use common::Fault;
use futures_util::future::BoxFuture;

/// Type-erased request payload carried through the behavior chain.
pub type AnyRequest = Box<dyn Any + Send + Sync>;

/// Type-erased response payload produced by a handler.
pub type AnyResponse = Box<dyn Any + Send>;

/// The erased outcome of dispatching a request.
pub type Outcome = Result<AnyResponse, Fault>;

/// A request travelling through the chain, tagged with its kind name.
pub struct RequestEnvelope {
    /// The request kind tag ([`crate::Request::NAME`]).
    pub name: &'static str,

    /// The request object itself.
    pub payload: AnyRequest,
}

/// Continuation invoking the remainder of the chain.
///
/// A behavior that never calls [`Next::run`] short-circuits the pipeline;
/// the handler (and any behaviors further in) never execute.
pub struct Next {
    run: Box<dyn FnOnce(RequestEnvelope) -> BoxFuture<'static, Outcome> + Send>,
}

impl Next {
    pub(crate) fn new(
        run: Box<dyn FnOnce(RequestEnvelope) -> BoxFuture<'static, Outcome> + Send>,
    ) -> Self {
        Self { run }
    }

    /// Invokes the rest of the chain with the given request.
    pub async fn run(self, request: RequestEnvelope) -> Outcome {
        (self.run)(request).await
    }
}

/// A cross-cutting step wrapping handler execution.
///
/// Behaviors form an ordered chain fixed at registration; the same order
/// applies to every request kind routed through the dispatcher. A behavior
/// may inspect or transform the request, call `next` and inspect the result,
/// or refuse to call `next` and fail immediately.
#[async_trait]
pub trait Behavior: Send + Sync {
    async fn handle(&self, request: RequestEnvelope, next: Next) -> Outcome;
}

/// Logs each request's kind, outcome, and elapsed time around the chain.
#[derive(Debug, Default)]
pub struct LoggingBehavior;

#[async_trait]
impl Behavior for LoggingBehavior {
    async fn handle(&self, request: RequestEnvelope, next: Next) -> Outcome {
        let name = request.name;
        let started = Instant::now();
        tracing::debug!(request = name, "dispatching request");

        let outcome = next.run(request).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            Ok(_) => {
                tracing::info!(request = name, elapsed_ms, "request handled");
            }
            Err(fault) => {
                tracing::warn!(request = name, elapsed_ms, fault = %fault, "request failed");
            }
        }

        outcome
    }
}
