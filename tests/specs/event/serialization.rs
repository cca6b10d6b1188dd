//! Event serialization specs
//!
//! Verify the wire format and the decode contract of events.

use crate::prelude::*;
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Nested {
    field1: String,
    field2: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Custom {
    timestamp: Option<chrono::DateTime<Utc>>,
    #[serde(rename = "struct")]
    nested: Nested,
    array: Vec<String>,
    map: std::collections::BTreeMap<String, Value>,
    bool: bool,
    int: i64,
    float: f64,
    null: Option<Value>,
}

#[test]
fn new_event_encodes_id_and_send_time() {
    let created = Utc::now();
    let event = BaseEvent::new("e1");

    let value: Value = serde_json::from_slice(&event.marshal().unwrap()).unwrap();

    assert_eq!(value["id"], "e1");
    let send_at: chrono::DateTime<Utc> = value["sendAt"].as_str().unwrap().parse().unwrap();
    assert!((send_at - created).num_milliseconds().abs() < 1_000);
    assert!(value.get("headers").is_none());
}

#[test]
fn encoding_is_stable_across_a_round_trip() {
    let event = BaseEvent::new("e1");
    event.set_header("tenant", json!("acme"));
    event.set_header("attempt", json!(2));
    event.set_header("route", json!({"region": "eu", "zones": ["a", "b"]}));

    let first = event.marshal().unwrap();
    let copy = BaseEvent::<eventsio_core::NoPayload>::default();
    copy.unmarshal(&first).unwrap();

    similar_asserts::assert_eq!(
        String::from_utf8(copy.marshal().unwrap()).unwrap(),
        String::from_utf8(first).unwrap()
    );
}

#[test]
fn custom_payload_encodes_every_field_kind() {
    let mut payload = Custom {
        timestamp: Some(Utc.with_ymd_and_hms(2023, 10, 15, 12, 30, 0).unwrap()),
        nested: Nested {
            field1: "Hello World".to_string(),
            field2: 100,
        },
        array: vec!["one".into(), "two".into(), "three".into()],
        bool: true,
        int: 42,
        float: 2.5,
        ..Custom::default()
    };
    payload.map.insert("key1".into(), json!("value1"));
    payload.map.insert("key2".into(), json!(2));
    let event = BaseEvent::with_payload("custom-1", payload);

    let value: Value = serde_json::from_slice(&event.marshal().unwrap()).unwrap();

    for field in ["id", "sendAt", "timestamp", "struct", "array", "map", "bool", "int", "float", "null"] {
        assert!(value.get(field).is_some(), "missing field {field}: {value}");
    }
    assert_eq!(value["struct"]["field1"], "Hello World");
    assert_eq!(value["int"], 42);
    assert_eq!(value["null"], Value::Null);
}

#[test]
fn custom_payload_decodes_with_missing_fields() {
    let event = BaseEvent::<Custom>::default();
    event
        .unmarshal(
            br#"{
                "id": "custom-2",
                "sendAt": "2023-10-15T12:30:00Z",
                "timestamp": "2023-10-15T12:30:00Z",
                "bool": true,
                "int": 42
            }"#,
        )
        .unwrap();

    let payload = event.payload();
    assert_eq!(event.id(), "custom-2");
    assert!(payload.bool);
    assert_eq!(payload.int, 42);
    assert_eq!(payload.nested, Nested::default());
    assert!(payload.array.is_empty());
    assert_eq!(payload.null, None);
}

#[test]
fn truncated_input_is_a_decode_error() {
    let event = BaseEvent::new("e1");
    let mut data = event.marshal().unwrap();
    data.truncate(data.len() / 2);

    let target = BaseEvent::new("target");
    let err = target.unmarshal(&data).unwrap_err();

    assert!(matches!(err, EventError::Decode(_)), "got {err:?}");
    assert_eq!(target.id(), "target");
}
