//! Commit session: the persistence-commit interceptor.
//!
//! Every save goes through the session, which stamps audit fields, writes
//! the document, and only after a successful write drains the aggregate's
//! event buffer and publishes each event in raise order. A failed write
//! leaves the buffer untouched so the caller may retry.

use std::sync::Arc;

use chrono::Utc;
use common::Fault;
use mediator::{EventPublisher, Notification};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::DocumentStore;
use uuid::Uuid;

use crate::aggregate::AggregateRoot;

/// Wraps a document store with audit stamping and event drain-and-publish.
pub struct Session<S> {
    store: S,
    publisher: Arc<EventPublisher>,
    actor: String,
}

impl<S: DocumentStore> Session<S> {
    /// Creates a session stamping audit fields as the `system` actor.
    pub fn new(store: S, publisher: Arc<EventPublisher>) -> Self {
        Self::with_actor(store, publisher, "system")
    }

    /// Creates a session stamping audit fields as the given actor.
    pub fn with_actor(store: S, publisher: Arc<EventPublisher>, actor: impl Into<String>) -> Self {
        Self {
            store,
            publisher,
            actor: actor.into(),
        }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persists an aggregate, then drains and publishes its pending events.
    ///
    /// Create-audit fields are stamped only when the document is new to the
    /// store; modified-audit fields are stamped on every save. The event
    /// buffer is drained only after the write succeeds.
    #[tracing::instrument(skip(self, aggregate))]
    pub async fn save<A>(&self, collection: &str, aggregate: &mut A) -> Result<(), Fault>
    where
        A: AggregateRoot + Serialize + Send,
    {
        let id: Uuid = aggregate.id().into();
        let is_new = self.store.get(collection, id).await?.is_none();

        let now = Utc::now();
        let audit = aggregate.audit_mut();
        if is_new {
            audit.created_at = Some(now);
            audit.created_by = Some(self.actor.clone());
        }
        audit.last_modified_at = Some(now);
        audit.last_modified_by = Some(self.actor.clone());

        let body = serde_json::to_value(&*aggregate)?;
        self.store.put(collection, id, body).await?;

        let events = aggregate.events_mut().drain();
        for event in &events {
            let notification: &dyn Notification = event.as_ref();
            self.publisher.publish(notification).await?;
        }

        Ok(())
    }

    /// Loads an entity by id.
    ///
    /// Returns None if the document doesn't exist.
    pub async fn load<A>(&self, collection: &str, id: Uuid) -> Result<Option<A>, Fault>
    where
        A: DeserializeOwned,
    {
        match self.store.get(collection, id).await? {
            Some(body) => Ok(Some(serde_json::from_value(body)?)),
            None => Ok(None),
        }
    }

    /// Deletes an entity by id, reporting whether it existed.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, Fault> {
        Ok(self.store.delete(collection, id).await?)
    }

    /// Lists every entity in a collection.
    pub async fn list<A>(&self, collection: &str) -> Result<Vec<A>, Fault>
    where
        A: DeserializeOwned,
    {
        let bodies = self.store.list(collection).await?;
        let mut entities = Vec::with_capacity(bodies.len());
        for body in bodies {
            entities.push(serde_json::from_value(body)?);
        }
        Ok(entities)
    }
}
