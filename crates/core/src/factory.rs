// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event construction with an injected clock

use crate::clock::{Clock, SystemClock};
use crate::event::{BaseEvent, NoPayload};

/// Stamps new events with the time reported by its clock
///
/// Ids stay with the caller; the factory only decides `sendAt`.
#[derive(Clone, Default)]
pub struct EventFactory<C = SystemClock> {
    clock: C,
}

impl<C: Clock> EventFactory<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn event(&self, id: impl Into<String>) -> BaseEvent {
        self.event_with(id, NoPayload {})
    }

    pub fn event_with<P>(&self, id: impl Into<String>, payload: P) -> BaseEvent<P> {
        BaseEvent::with_payload_at(id, payload, self.clock.now())
    }
}
