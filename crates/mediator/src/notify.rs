//! Notification publisher fanning events out to their handlers.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use common::Fault;

/// A fact published to zero or more handlers after it has happened.
///
/// Unlike requests, notifications have no response and no single-handler
/// constraint: any number of handlers may subscribe, including none.
pub trait Notification: Any + Send + Sync {
    /// Stable name used for logging and diagnostics.
    fn name(&self) -> &'static str;
}

/// Handles one notification type.
#[async_trait]
pub trait NotificationHandler<N: Notification>: Send + Sync {
    async fn handle(&self, notification: &N) -> Result<(), Fault>;
}

#[async_trait]
trait ErasedNotificationHandler: Send + Sync {
    async fn call(&self, notification: &dyn Notification) -> Result<(), Fault>;
}

struct ErasedSubscription<N, H> {
    inner: H,
    _marker: PhantomData<fn(N)>,
}

#[async_trait]
impl<N, H> ErasedNotificationHandler for ErasedSubscription<N, H>
where
    N: Notification,
    H: NotificationHandler<N>,
{
    async fn call(&self, notification: &dyn Notification) -> Result<(), Fault> {
        let any: &dyn Any = notification;
        match any.downcast_ref::<N>() {
            Some(typed) => self.inner.handle(typed).await,
            None => Err(Fault::Internal(format!(
                "notification '{}' does not match its subscription type",
                notification.name()
            ))),
        }
    }
}

/// Delivers published notifications to every subscribed handler, in
/// subscription order.
///
/// The subscription table is keyed by the notification's concrete type and
/// immutable after [`EventPublisherBuilder::build`].
#[derive(Default)]
pub struct EventPublisher {
    subscriptions: HashMap<TypeId, Vec<Arc<dyn ErasedNotificationHandler>>>,
}

impl EventPublisher {
    pub fn builder() -> EventPublisherBuilder {
        EventPublisherBuilder::default()
    }

    /// Publishes one notification to all of its handlers, sequentially and
    /// in subscription order.
    ///
    /// A notification with no subscribers is not an error.
    pub async fn publish(&self, notification: &dyn Notification) -> Result<(), Fault> {
        let any: &dyn Any = notification;
        let Some(handlers) = self.subscriptions.get(&any.type_id()) else {
            tracing::debug!(event = notification.name(), "no handlers subscribed");
            return Ok(());
        };

        for handler in handlers {
            handler.call(notification).await?;
        }

        metrics::counter!("events_published").increment(1);
        tracing::info!(
            event = notification.name(),
            handlers = handlers.len(),
            "domain event published"
        );
        Ok(())
    }

    /// Returns the number of handlers subscribed for a notification type.
    pub fn subscription_count<N: Notification>(&self) -> usize {
        self.subscriptions
            .get(&TypeId::of::<N>())
            .map_or(0, Vec::len)
    }
}

/// Builder for the publisher's subscription table.
#[derive(Default)]
pub struct EventPublisherBuilder {
    subscriptions: HashMap<TypeId, Vec<Arc<dyn ErasedNotificationHandler>>>,
}

impl EventPublisherBuilder {
    /// Subscribes a handler to a notification type.
    pub fn subscribe<N, H>(mut self, handler: H) -> Self
    where
        N: Notification,
        H: NotificationHandler<N> + 'static,
    {
        self.subscriptions
            .entry(TypeId::of::<N>())
            .or_default()
            .push(Arc::new(ErasedSubscription {
                inner: handler,
                _marker: PhantomData,
            }));
        self
    }

    pub fn build(self) -> EventPublisher {
        EventPublisher {
            subscriptions: self.subscriptions,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug)]
    struct ThingHappened {
        detail: String,
    }

    impl Notification for ThingHappened {
        fn name(&self) -> &'static str {
            "ThingHappened"
        }
    }

    struct Recorder {
        label: &'static str,
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl NotificationHandler<ThingHappened> for Recorder {
        async fn handle(&self, notification: &ThingHappened) -> Result<(), Fault> {
            self.seen
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.label, notification.detail));
            Ok(())
        }
    }

    #[tokio::test]
    async fn publish_with_no_subscribers_is_ok() {
        let publisher = EventPublisher::builder().build();
        let event = ThingHappened {
            detail: "x".to_string(),
        };
        publisher.publish(&event).await.unwrap();
    }

    #[tokio::test]
    async fn handlers_run_in_subscription_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let publisher = EventPublisher::builder()
            .subscribe::<ThingHappened, _>(Recorder {
                label: "first",
                seen: seen.clone(),
            })
            .subscribe::<ThingHappened, _>(Recorder {
                label: "second",
                seen: seen.clone(),
            })
            .build();

        let event = ThingHappened {
            detail: "e1".to_string(),
        };
        publisher.publish(&event).await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["first:e1", "second:e1"]);
        assert_eq!(publisher.subscription_count::<ThingHappened>(), 2);
    }
}
