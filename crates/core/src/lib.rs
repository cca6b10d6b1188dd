// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! eventsio-core: In-process events and the publish/subscribe contract
//!
//! This crate provides:
//! - The `Event` trait and `BaseEvent`, a lock-protected event with headers
//!   and an optional typed payload
//! - The `EventBus` and `Handler` traits implemented by bus adapters
//! - Publish options and a clock abstraction for building events

pub mod bus;
pub mod clock;
pub mod event;
pub mod factory;
pub mod options;

// Re-exports
pub use bus::{BusError, EventBus, Handler};
pub use clock::{Clock, FakeClock, SystemClock};
pub use event::{BaseEvent, Event, EventError, Headers, NoPayload};
pub use factory::EventFactory;
pub use options::{PublishOption, PublishOptions};
