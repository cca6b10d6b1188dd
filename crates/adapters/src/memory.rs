// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory event bus

use eventsio_core::{BusError, Event, EventBus, Handler};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

type Registry = HashMap<String, Vec<Arc<dyn Handler>>>;

/// In-process bus that dispatches synchronously on the publisher's thread
///
/// Handlers for a topic run in registration order, one after another, and
/// `publish` returns only after the last one has returned. A slow handler
/// therefore delays the publisher and every handler queued after it.
///
/// Handlers are not isolated from each other: a panicking handler unwinds
/// through `publish`, and the handlers after it are not invoked for that
/// event. The registry itself stays usable.
///
/// Clones share the same registry. Separately constructed buses are
/// independent.
#[derive(Clone, Default)]
pub struct MemoryEventBus {
    subscribers: Arc<RwLock<Registry>>,
}

impl MemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handlers registered for `topic`
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(topic)
            .map_or(0, Vec::len)
    }

    /// All topics with at least one handler, sorted
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self
            .subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        topics.sort();
        topics
    }

    /// Snapshot of the handlers for `topic`, taken under the read lock
    fn handlers(&self, topic: &str) -> Vec<Arc<dyn Handler>> {
        self.subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(topic)
            .cloned()
            .unwrap_or_default()
    }
}

impl EventBus for MemoryEventBus {
    fn publish(&self, topic: &str, event: &dyn Event) -> Result<(), BusError> {
        // Lock is released before any handler runs, so handlers may
        // subscribe or publish re-entrantly.
        let handlers = self.handlers(topic);
        tracing::trace!(topic, handlers = handlers.len(), "dispatching");

        for handler in &handlers {
            handler.handle(event);
        }
        Ok(())
    }

    fn subscribe(&self, topic: &str, handler: Arc<dyn Handler>) -> Result<(), BusError> {
        tracing::debug!(topic, handler = handler.name(), "subscribing");

        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        subs.entry(topic.to_string()).or_default().push(handler);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
