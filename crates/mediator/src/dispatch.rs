//! Dispatcher routing each request to its single registered handler.

use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use common::Fault;

use crate::behavior::{AnyRequest, Behavior, Next, Outcome, RequestEnvelope};
use crate::error::RegistryError;
use crate::handler::RequestHandler;
use crate::request::Request;

#[async_trait]
trait ErasedHandler: Send + Sync {
    async fn call(&self, request: AnyRequest) -> Outcome;
}

struct ErasedRequestHandler<R, H> {
    inner: H,
    _marker: PhantomData<fn(R)>,
}

#[async_trait]
impl<R, H> ErasedHandler for ErasedRequestHandler<R, H>
where
    R: Request,
    H: RequestHandler<R>,
{
    async fn call(&self, request: AnyRequest) -> Outcome {
        let request = match request.downcast::<R>() {
            Ok(request) => *request,
            Err(_) => {
                return Err(Fault::Internal(format!(
                    "request payload does not match handler for '{}'",
                    R::NAME
                )));
            }
        };

        self.inner
            .handle(request)
            .await
            .map(|response| Box::new(response) as Box<dyn Any + Send>)
    }
}

/// Routes a request object to exactly one handler through the behavior chain.
///
/// The type-to-handler table is built once at startup and immutable after
/// [`DispatcherBuilder::build`]; dispatch itself is stateless and safe for
/// concurrent, unordered invocation with distinct requests.
pub struct Dispatcher {
    handlers: HashMap<&'static str, Arc<dyn ErasedHandler>>,
    behaviors: Vec<Arc<dyn Behavior>>,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Dispatches a request, returning the handler's typed response.
    ///
    /// The request passes through every registered behavior in order before
    /// reaching its handler; any behavior may short-circuit with a fault.
    pub async fn send<R: Request>(&self, request: R) -> Result<R::Response, Fault> {
        metrics::counter!("requests_dispatched").increment(1);

        let handler = self.handlers.get(R::NAME).cloned().ok_or_else(|| {
            Fault::Internal(format!("no handler registered for '{}'", R::NAME))
        })?;

        let envelope = RequestEnvelope {
            name: R::NAME,
            payload: Box::new(request),
        };

        let response = self.run_chain(handler, envelope).await?;
        response
            .downcast::<R::Response>()
            .map(|response| *response)
            .map_err(|_| {
                Fault::Internal(format!(
                    "handler for '{}' produced a mismatched response type",
                    R::NAME
                ))
            })
    }

    /// Returns true if a handler is registered for the request kind.
    ///
    /// Startup wiring uses this to assert that every routed request kind has
    /// a handler before the server accepts traffic.
    pub fn is_registered<R: Request>(&self) -> bool {
        self.handlers.contains_key(R::NAME)
    }

    /// Returns the number of registered request kinds.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    async fn run_chain(&self, handler: Arc<dyn ErasedHandler>, envelope: RequestEnvelope) -> Outcome {
        let mut next = Next::new(Box::new(move |envelope: RequestEnvelope| {
            Box::pin(async move { handler.call(envelope.payload).await })
        }));

        // Fold behaviors innermost-last so registration order is the order
        // a request traverses them.
        for behavior in self.behaviors.iter().rev() {
            let behavior = Arc::clone(behavior);
            let inner = next;
            next = Next::new(Box::new(move |envelope| {
                Box::pin(async move { behavior.handle(envelope, inner).await })
            }));
        }

        next.run(envelope).await
    }
}

/// Builder assembling the dispatcher's registration table.
///
/// Duplicate registrations are recorded and surface as a
/// [`RegistryError::DuplicateHandler`] from [`DispatcherBuilder::build`] —
/// a configuration error at startup, never at call time.
#[derive(Default)]
pub struct DispatcherBuilder {
    handlers: HashMap<&'static str, Arc<dyn ErasedHandler>>,
    behaviors: Vec<Arc<dyn Behavior>>,
    duplicates: Vec<&'static str>,
}

impl DispatcherBuilder {
    /// Appends a behavior to the chain. Order of calls is execution order.
    pub fn behavior<B: Behavior + 'static>(mut self, behavior: B) -> Self {
        self.behaviors.push(Arc::new(behavior));
        self
    }

    /// Registers the handler for a request kind.
    pub fn register<R, H>(mut self, handler: H) -> Self
    where
        R: Request,
        H: RequestHandler<R> + 'static,
    {
        let erased = Arc::new(ErasedRequestHandler {
            inner: handler,
            _marker: PhantomData,
        });
        if self.handlers.insert(R::NAME, erased).is_some() {
            self.duplicates.push(R::NAME);
        }
        self
    }

    pub fn build(self) -> Result<Dispatcher, RegistryError> {
        if let Some(name) = self.duplicates.first() {
            return Err(RegistryError::DuplicateHandler(name));
        }

        Ok(Dispatcher {
            handlers: self.handlers,
            behaviors: self.behaviors,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::validate::{FieldFailure, ValidationBehavior, Validator, ValidatorRegistry};

    struct Ping {
        text: String,
    }

    impl Request for Ping {
        type Response = String;
        const NAME: &'static str = "Ping";
    }

    struct PingHandler {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RequestHandler<Ping> for PingHandler {
        async fn handle(&self, request: Ping) -> Result<String, Fault> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("pong: {}", request.text))
        }
    }

    struct RequireText;

    #[async_trait]
    impl Validator<Ping> for RequireText {
        async fn validate(&self, request: &Ping) -> Vec<FieldFailure> {
            if request.text.is_empty() {
                vec![FieldFailure::new("Text", "Text is required")]
            } else {
                Vec::new()
            }
        }
    }

    struct Trace {
        label: &'static str,
        seen: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Behavior for Trace {
        async fn handle(&self, request: RequestEnvelope, next: Next) -> Outcome {
            self.seen.lock().unwrap().push(self.label);
            next.run(request).await
        }
    }

    #[tokio::test]
    async fn dispatch_routes_to_the_single_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let dispatcher = Dispatcher::builder()
            .register::<Ping, _>(PingHandler {
                calls: calls.clone(),
            })
            .build()
            .unwrap();

        let response = dispatcher
            .send(Ping {
                text: "hello".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response, "pong: hello");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn duplicate_registration_is_a_startup_error() {
        let result = Dispatcher::builder()
            .register::<Ping, _>(PingHandler {
                calls: Arc::new(AtomicUsize::new(0)),
            })
            .register::<Ping, _>(PingHandler {
                calls: Arc::new(AtomicUsize::new(0)),
            })
            .build();

        assert_eq!(result.err(), Some(RegistryError::DuplicateHandler("Ping")));
    }

    #[tokio::test]
    async fn missing_handler_is_an_internal_fault() {
        let dispatcher = Dispatcher::builder().build().unwrap();

        let fault = dispatcher
            .send(Ping {
                text: "hello".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(fault, Fault::Internal(_)));
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_the_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = ValidatorRegistry::builder()
            .register::<Ping, _>(RequireText)
            .build();
        let dispatcher = Dispatcher::builder()
            .behavior(ValidationBehavior::new(Arc::new(registry)))
            .register::<Ping, _>(PingHandler {
                calls: calls.clone(),
            })
            .build()
            .unwrap();

        let fault = dispatcher
            .send(Ping {
                text: String::new(),
            })
            .await
            .unwrap_err();

        match fault {
            Fault::Validation { field, request, .. } => {
                assert_eq!(field, "Text");
                assert_eq!(request, "Ping");
            }
            other => panic!("expected validation fault, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_request_executes_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = ValidatorRegistry::builder()
            .register::<Ping, _>(RequireText)
            .build();
        let dispatcher = Dispatcher::builder()
            .behavior(ValidationBehavior::new(Arc::new(registry)))
            .register::<Ping, _>(PingHandler {
                calls: calls.clone(),
            })
            .build()
            .unwrap();

        dispatcher
            .send(Ping {
                text: "ok".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn behaviors_run_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = Dispatcher::builder()
            .behavior(Trace {
                label: "outer",
                seen: seen.clone(),
            })
            .behavior(Trace {
                label: "inner",
                seen: seen.clone(),
            })
            .register::<Ping, _>(PingHandler {
                calls: Arc::new(AtomicUsize::new(0)),
            })
            .build()
            .unwrap();

        dispatcher
            .send(Ping {
                text: "x".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["outer", "inner"]);
    }
}
