// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event contract and the lock-protected base implementation
//!
//! Every event carries an identity, a send timestamp and an open map of
//! headers. Concrete event types compose [`BaseEvent`] with a typed payload
//! whose fields are encoded at the same level as the base fields:
//!
//! ```json
//! {"id":"e1","sendAt":"2023-01-01T12:00:00Z","headers":{"trace":"abc"},"sku":"A-1"}
//! ```

use crate::clock::{Clock, SystemClock};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Event headers, keyed by name
///
/// Ordered so that encoding the same headers always yields the same bytes.
pub type Headers = BTreeMap<String, Value>;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("failed to encode event: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode event: {0}")]
    Decode(#[source] serde_json::Error),
}

/// A self-describing unit of data that can be published on a bus
///
/// All accessors take `&self`; implementations guard their state so that an
/// event can be shared between handlers and threads.
pub trait Event: Any + Send + Sync {
    fn id(&self) -> String;

    fn send_at(&self) -> DateTime<Utc>;

    /// Header value for `key`, or `None` if it was never set
    fn header(&self, key: &str) -> Option<Value>;

    /// Insert or overwrite a header
    fn set_header(&self, key: &str, value: Value);

    /// Snapshot of all headers
    fn headers(&self) -> Headers;

    /// Encode the event, including any payload fields
    fn marshal(&self) -> Result<Vec<u8>, EventError>;

    /// Replace the event's state with the decoded contents of `data`
    ///
    /// Decoding is all-or-nothing: on error the event keeps its previous
    /// state. Fields missing from `data` take their defaults rather than
    /// keeping the old values.
    fn unmarshal(&self, data: &[u8]) -> Result<(), EventError>;

    fn as_any(&self) -> &dyn Any;
}

impl<'a> dyn Event + 'a {
    /// Recover the concrete event type behind a trait object
    pub fn downcast_ref<T: Event>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Payload of an event that carries nothing beyond the base fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoPayload {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Record<P> {
    #[serde(default)]
    id: String,
    #[serde(rename = "sendAt", default)]
    send_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    headers: Headers,
    #[serde(flatten)]
    payload: P,
}

/// Keys the base fields occupy in the encoded object
const BASE_FIELDS: [&str; 3] = ["id", "sendAt", "headers"];

/// Base event implementation, optionally carrying a typed payload `P`
///
/// A single lock guards the identity, timestamp, headers and payload, so a
/// reader never observes a half-applied write.
///
/// The payload's fields are encoded next to `id`, `sendAt` and `headers`,
/// so `P` must not serialize a field under any of those names. `marshal`
/// rejects such a payload with [`EventError::Encode`].
#[derive(Debug, Default)]
pub struct BaseEvent<P = NoPayload> {
    record: RwLock<Record<P>>,
}

impl BaseEvent {
    /// Create an event stamped with the current UTC time
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_payload(id, NoPayload {})
    }

    /// Create an event stamped with the given clock's time
    pub fn new_with_clock(id: impl Into<String>, clock: &impl Clock) -> Self {
        Self::with_payload_at(id, NoPayload {}, clock.now())
    }
}

impl<P> BaseEvent<P> {
    /// Create an event carrying `payload`, stamped with the current UTC time
    pub fn with_payload(id: impl Into<String>, payload: P) -> Self {
        Self::with_payload_at(id, payload, SystemClock.now())
    }

    pub fn with_payload_at(id: impl Into<String>, payload: P, send_at: DateTime<Utc>) -> Self {
        Self {
            record: RwLock::new(Record {
                id: id.into(),
                send_at,
                headers: Headers::new(),
                payload,
            }),
        }
    }

    pub fn set_id(&self, id: impl Into<String>) {
        self.write().id = id.into();
    }

    pub fn set_send_at(&self, send_at: DateTime<Utc>) {
        self.write().send_at = send_at;
    }

    /// Insert or overwrite a header from any value convertible to JSON
    pub fn insert_header(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.write().headers.insert(key.into(), value.into());
    }

    /// Clone of the current payload
    pub fn payload(&self) -> P
    where
        P: Clone,
    {
        self.read().payload.clone()
    }

    /// Read the payload under the shared lock
    pub fn read_payload<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        f(&self.read().payload)
    }

    /// Mutate the payload under the exclusive lock
    pub fn update_payload<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        f(&mut self.write().payload)
    }

    fn read(&self) -> RwLockReadGuard<'_, Record<P>> {
        self.record.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Record<P>> {
        self.record.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl<P> Event for BaseEvent<P>
where
    P: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn id(&self) -> String {
        self.read().id.clone()
    }

    fn send_at(&self) -> DateTime<Utc> {
        self.read().send_at
    }

    fn header(&self, key: &str) -> Option<Value> {
        self.read().headers.get(key).cloned()
    }

    fn set_header(&self, key: &str, value: Value) {
        self.write().headers.insert(key.to_string(), value);
    }

    fn headers(&self) -> Headers {
        self.read().headers.clone()
    }

    fn marshal(&self) -> Result<Vec<u8>, EventError> {
        let record = self.read();
        check_payload_fields(&record.payload).map_err(EventError::Encode)?;
        serde_json::to_vec(&*record).map_err(EventError::Encode)
    }

    fn unmarshal(&self, data: &[u8]) -> Result<(), EventError> {
        let mut record = self.write();
        let decoded = serde_json::from_slice::<Record<P>>(data).map_err(|e| {
            tracing::debug!(error = %e, len = data.len(), "event decode failed");
            EventError::Decode(e)
        })?;
        *record = decoded;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn check_payload_fields<P: Serialize>(payload: &P) -> Result<(), serde_json::Error> {
    if let Value::Object(fields) = serde_json::to_value(payload)? {
        if let Some(key) = BASE_FIELDS.iter().find(|key| fields.contains_key(**key)) {
            return Err(serde::ser::Error::custom(format!(
                "payload field `{key}` collides with a base event field"
            )));
        }
    }
    Ok(())
}

impl<P: Clone> Clone for BaseEvent<P> {
    fn clone(&self) -> Self {
        Self {
            record: RwLock::new(self.read().clone()),
        }
    }
}

impl<P> fmt::Display for BaseEvent<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.read();
        write!(
            f,
            "BaseEvent{{id: {}, sendAt: {}}}",
            record.id,
            record.send_at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        )
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
