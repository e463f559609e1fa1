//! Aggregate primitives: domain events and the pending-event buffer.

use std::sync::Arc;

use mediator::Notification;

use crate::entity::Entity;

/// A fact raised by an aggregate during a command.
///
/// Domain events are immutable, named in past tense, and owned exclusively
/// by the aggregate instance that raised them until drained.
pub trait DomainEvent: Notification {}

/// Ordered buffer of domain events pending publication.
///
/// Events are appended in raise order and drained exactly once per
/// successful commit. The buffer is never serialized with its aggregate.
#[derive(Clone, Default)]
pub struct EventBuffer {
    pending: Vec<Arc<dyn DomainEvent>>,
}

impl EventBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event, preserving insertion order.
    pub fn record<E: DomainEvent>(&mut self, event: E) {
        self.pending.push(Arc::new(event));
    }

    /// Takes all pending events, leaving the buffer empty.
    ///
    /// Atomic with respect to the owning request's thread of control:
    /// draining twice in a row yields an empty list the second time.
    pub fn drain(&mut self) -> Vec<Arc<dyn DomainEvent>> {
        std::mem::take(&mut self.pending)
    }

    /// Returns the pending events without draining them.
    pub fn pending(&self) -> &[Arc<dyn DomainEvent>] {
        &self.pending
    }

    /// Returns the number of pending events.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if no events are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl std::fmt::Debug for EventBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.pending.iter().map(|event| event.name()))
            .finish()
    }
}

/// A consistency-boundary entity that buffers domain events until commit.
pub trait AggregateRoot: Entity {
    /// Returns the pending-event buffer.
    fn events(&self) -> &EventBuffer;

    /// Returns the buffer for recording and draining.
    fn events_mut(&mut self) -> &mut EventBuffer;
}
