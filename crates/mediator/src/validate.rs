//! Validator registry and the validation behavior.

use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use common::Fault;
use futures_util::future::join_all;

use crate::behavior::{Behavior, Next, Outcome, RequestEnvelope};
use crate::request::Request;

/// A single failed field: path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub field: String,
    pub message: String,
}

impl FieldFailure {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A validation rule set for one request kind.
///
/// Rules are pure functions of the request: they must not share mutable
/// state, which lets the registry run every rule set for a request
/// concurrently. Returning an empty list means the request passed.
#[async_trait]
pub trait Validator<R: Request>: Send + Sync {
    async fn validate(&self, request: &R) -> Vec<FieldFailure>;
}

#[async_trait]
trait ErasedValidator: Send + Sync {
    async fn validate(&self, request: &(dyn Any + Send + Sync)) -> Vec<FieldFailure>;
}

struct ErasedRule<R, V> {
    inner: V,
    _marker: PhantomData<fn(R)>,
}

#[async_trait]
impl<R, V> ErasedValidator for ErasedRule<R, V>
where
    R: Request,
    V: Validator<R>,
{
    async fn validate(&self, request: &(dyn Any + Send + Sync)) -> Vec<FieldFailure> {
        match request.downcast_ref::<R>() {
            Some(typed) => self.inner.validate(typed).await,
            // A rule registered under another kind's tag never sees this
            // request; treat the mismatch as no findings.
            None => Vec::new(),
        }
    }
}

/// Holds zero or more validation rule sets per request kind.
///
/// Immutable after [`ValidatorRegistryBuilder::build`]; safe for
/// unsynchronized concurrent reads.
#[derive(Default)]
pub struct ValidatorRegistry {
    rules: HashMap<&'static str, Vec<Arc<dyn ErasedValidator>>>,
}

impl ValidatorRegistry {
    pub fn builder() -> ValidatorRegistryBuilder {
        ValidatorRegistryBuilder::default()
    }

    /// Runs every rule set registered for the request kind.
    ///
    /// Rule sets execute concurrently; their failure lists are concatenated
    /// in registration order, never interleaved. A kind with no validators
    /// always passes. Never fails itself.
    pub async fn validate(
        &self,
        name: &str,
        request: &(dyn Any + Send + Sync),
    ) -> Vec<FieldFailure> {
        let Some(rules) = self.rules.get(name) else {
            return Vec::new();
        };

        let results = join_all(rules.iter().map(|rule| rule.validate(request))).await;
        results.into_iter().flatten().collect()
    }

    /// Returns the number of rule sets registered for a request kind.
    pub fn rule_count(&self, name: &str) -> usize {
        self.rules.get(name).map_or(0, Vec::len)
    }
}

/// Builder for the validator registry.
#[derive(Default)]
pub struct ValidatorRegistryBuilder {
    rules: HashMap<&'static str, Vec<Arc<dyn ErasedValidator>>>,
}

impl ValidatorRegistryBuilder {
    /// Registers a rule set for a request kind.
    ///
    /// Multiple rule sets per kind are allowed; they run concurrently and
    /// report in registration order.
    pub fn register<R, V>(mut self, validator: V) -> Self
    where
        R: Request,
        V: Validator<R> + 'static,
    {
        self.rules.entry(R::NAME).or_default().push(Arc::new(ErasedRule {
            inner: validator,
            _marker: PhantomData,
        }));
        self
    }

    pub fn build(self) -> ValidatorRegistry {
        ValidatorRegistry { rules: self.rules }
    }
}

/// Behavior that consults the validator registry before the handler runs.
///
/// On any failure the chain is short-circuited with a validation fault
/// carrying the first failing field; the handler never sees an invalid
/// request.
pub struct ValidationBehavior {
    registry: Arc<ValidatorRegistry>,
}

impl ValidationBehavior {
    pub fn new(registry: Arc<ValidatorRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Behavior for ValidationBehavior {
    async fn handle(&self, request: RequestEnvelope, next: Next) -> Outcome {
        let failures = self
            .registry
            .validate(request.name, request.payload.as_ref())
            .await;

        if let Some(first) = failures.into_iter().next() {
            metrics::counter!("requests_rejected").increment(1);
            return Err(Fault::Validation {
                message: first.message,
                field: first.field,
                request: request.name,
            });
        }

        next.run(request).await
    }
}
