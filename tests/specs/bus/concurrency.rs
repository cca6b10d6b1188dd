//! Bus concurrency specs
//!
//! Verify that concurrent publishers and subscribers neither lose nor
//! duplicate deliveries.

use crate::prelude::*;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn ten_publishers_reach_ten_handlers_exactly_once() {
    let bus = MemoryEventBus::new();
    let recorders: Vec<Recorder> = (0..10).map(|_| Recorder::new()).collect();
    for recorder in &recorders {
        bus.subscribe("concurrent_topic", Arc::new(recorder.clone()))
            .unwrap();
    }

    std::thread::scope(|s| {
        for n in 0..10 {
            let bus = bus.clone();
            s.spawn(move || {
                let event = BaseEvent::new(format!("event-{n}"));
                bus.publish("concurrent_topic", &event).unwrap();
            });
        }
    });

    let total: usize = recorders.iter().map(Recorder::count).sum();
    assert_eq!(total, 100);
    for recorder in &recorders {
        let mut ids = recorder.ids();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10, "each handler sees every event once");
    }
}

#[test]
fn subscriptions_completed_before_publish_are_always_seen() {
    let bus = MemoryEventBus::new();
    let calls = Arc::new(AtomicUsize::new(0));

    std::thread::scope(|s| {
        for _ in 0..4 {
            let bus = bus.clone();
            let calls = Arc::clone(&calls);
            s.spawn(move || {
                for _ in 0..10 {
                    let calls = Arc::clone(&calls);
                    bus.subscribe(
                        "orders",
                        Arc::new(move |_: &dyn Event| {
                            calls.fetch_add(1, Ordering::SeqCst);
                        }),
                    )
                    .unwrap();
                }
            });
        }
    });

    bus.publish("orders", &BaseEvent::new("after-join")).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 40);
}

#[test]
fn handlers_on_many_threads_can_share_one_event() {
    let bus = MemoryEventBus::new();
    bus.subscribe(
        "orders",
        Arc::new(|event: &dyn Event| {
            let seen = event.header("seen").and_then(|v| v.as_u64()).unwrap_or(0);
            event.set_header("seen", json!(seen + 1));
        }),
    )
    .unwrap();

    let event = BaseEvent::new("shared");
    std::thread::scope(|s| {
        for _ in 0..4 {
            let bus = &bus;
            let event = &event;
            s.spawn(move || bus.publish("orders", event).unwrap());
        }
    });

    // Read-modify-write across separate lock acquisitions may interleave,
    // but every write lands whole.
    let seen = event.header("seen").and_then(|v| v.as_u64()).unwrap();
    assert!((1..=4).contains(&seen));
    assert!(event.marshal().is_ok());
}
