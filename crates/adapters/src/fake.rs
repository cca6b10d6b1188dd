// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake event bus for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use eventsio_core::{BusError, Event, EventBus, Handler, PublishOptions};
use std::sync::{Arc, Mutex};

/// Recorded bus call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusCall {
    Publish {
        topic: String,
        event_id: String,
        retry: bool,
    },
    Subscribe {
        topic: String,
        handler: String,
    },
}

/// Fake bus that records calls without dispatching
#[derive(Clone, Default)]
pub struct FakeEventBus {
    calls: Arc<Mutex<Vec<BusCall>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl FakeEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<BusCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Make every following call fail with a registry error
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.lock().unwrap_or_else(|e| e.into_inner()) = Some(message.into());
    }

    fn record(&self, topic: &str, call: BusCall) -> Result<(), BusError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
        match self
            .fail_with
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            Some(message) => Err(BusError::registry(topic, message.clone())),
            None => Ok(()),
        }
    }
}

impl EventBus for FakeEventBus {
    fn publish(&self, topic: &str, event: &dyn Event) -> Result<(), BusError> {
        self.publish_with(topic, event, &PublishOptions::default())
    }

    fn publish_with(
        &self,
        topic: &str,
        event: &dyn Event,
        options: &PublishOptions,
    ) -> Result<(), BusError> {
        self.record(
            topic,
            BusCall::Publish {
                topic: topic.to_string(),
                event_id: event.id(),
                retry: options.is_retry(),
            },
        )
    }

    fn subscribe(&self, topic: &str, handler: Arc<dyn Handler>) -> Result<(), BusError> {
        self.record(
            topic,
            BusCall::Subscribe {
                topic: topic.to_string(),
                handler: handler.name().to_string(),
            },
        )
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
