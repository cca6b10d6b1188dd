// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced bus wrapper for consistent observability

use crate::config::BusConfig;
use eventsio_core::{BusError, Event, EventBus, Handler, PublishOptions};
use std::sync::Arc;
use std::time::Instant;

/// Wrapper that adds tracing to any EventBus
#[derive(Clone)]
pub struct TracedEventBus<B> {
    inner: B,
    config: BusConfig,
}

impl<B> TracedEventBus<B> {
    pub fn new(inner: B) -> Self {
        Self::with_config(inner, BusConfig::default())
    }

    pub fn with_config(inner: B, config: BusConfig) -> Self {
        Self { inner, config }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }
}

impl<B: EventBus> TracedEventBus<B> {
    fn dispatch(
        &self,
        topic: &str,
        event: &dyn Event,
        options: Option<&PublishOptions>,
    ) -> Result<(), BusError> {
        let event_id = event.id();
        let span = tracing::info_span!(
            "bus.publish",
            bus = %self.config.name,
            topic,
            event_id = %event_id
        );
        let _guard = span.enter();

        let retry = options.is_some_and(PublishOptions::is_retry);
        tracing::debug!(retry, "publishing");

        let start = Instant::now();
        let result = match options {
            Some(options) => self.inner.publish_with(topic, event, options),
            None => self.inner.publish(topic, event),
        };
        let elapsed = start.elapsed();
        let elapsed_ms = elapsed.as_millis() as u64;

        match &result {
            Ok(()) if elapsed > self.config.slow_dispatch_threshold => tracing::warn!(
                elapsed_ms,
                threshold_ms = self.config.slow_dispatch_threshold.as_millis() as u64,
                "slow dispatch"
            ),
            Ok(()) => tracing::debug!(elapsed_ms, "published"),
            Err(e) => tracing::error!(elapsed_ms, error = %e, "publish failed"),
        }

        result
    }
}

impl<B: EventBus> EventBus for TracedEventBus<B> {
    fn publish(&self, topic: &str, event: &dyn Event) -> Result<(), BusError> {
        self.dispatch(topic, event, None)
    }

    fn publish_with(
        &self,
        topic: &str,
        event: &dyn Event,
        options: &PublishOptions,
    ) -> Result<(), BusError> {
        self.dispatch(topic, event, Some(options))
    }

    fn subscribe(&self, topic: &str, handler: Arc<dyn Handler>) -> Result<(), BusError> {
        let span = tracing::info_span!("bus.subscribe", bus = %self.config.name, topic);
        let _guard = span.enter();

        let handler_name = handler.name().to_string();
        let result = self.inner.subscribe(topic, handler);

        match &result {
            Ok(()) => tracing::info!(handler = %handler_name, "subscribed"),
            Err(e) => tracing::error!(handler = %handler_name, error = %e, "subscribe failed"),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
