// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Topic-keyed publish/subscribe contract

use crate::event::Event;
use crate::options::PublishOptions;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BusError {
    /// The adapter could not resolve or record a topic registration
    #[error("registry error on topic {topic}: {message}")]
    Registry { topic: String, message: String },
}

impl BusError {
    pub fn registry(topic: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Registry {
            topic: topic.into(),
            message: message.into(),
        }
    }
}

/// Receives events published on a subscribed topic
///
/// Handlers run synchronously on the publisher's thread. Every handler in a
/// dispatch sees the same event instance, including header changes made by
/// handlers that ran before it.
pub trait Handler: Send + Sync {
    fn handle(&self, event: &dyn Event);

    /// Name used when logging the handler
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Handler for F
where
    F: Fn(&dyn Event) + Send + Sync,
{
    fn handle(&self, event: &dyn Event) {
        self(event)
    }
}

/// A topic registry that dispatches published events to subscribed handlers
pub trait EventBus: Send + Sync {
    /// Deliver `event` to every handler subscribed to `topic`
    ///
    /// Returns once all handlers have returned. A topic without handlers is
    /// not an error.
    fn publish(&self, topic: &str, event: &dyn Event) -> Result<(), BusError>;

    /// Publish with options; adapters that do not understand an option ignore it
    fn publish_with(
        &self,
        topic: &str,
        event: &dyn Event,
        options: &PublishOptions,
    ) -> Result<(), BusError> {
        let _ = options;
        self.publish(topic, event)
    }

    /// Register `handler` for every future publish on `topic`
    fn subscribe(&self, topic: &str, handler: Arc<dyn Handler>) -> Result<(), BusError>;
}

impl<B: EventBus + ?Sized> EventBus for Arc<B> {
    fn publish(&self, topic: &str, event: &dyn Event) -> Result<(), BusError> {
        (**self).publish(topic, event)
    }

    fn publish_with(
        &self,
        topic: &str,
        event: &dyn Event,
        options: &PublishOptions,
    ) -> Result<(), BusError> {
        (**self).publish_with(topic, event, options)
    }

    fn subscribe(&self, topic: &str, handler: Arc<dyn Handler>) -> Result<(), BusError> {
        (**self).subscribe(topic, handler)
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
