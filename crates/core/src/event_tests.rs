// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use yare::parameterized;

#[parameterized(
    single_word = { "foo" },
    dotted = { "user.created" },
    underscores = { "cache.flush_all" },
    digits = { "v2.order.shipped" },
    mixed_case = { "Kernel.Request" },
    leading_dot = { ".hidden" },
)]
fn valid_event_names(name: &str) {
    let parsed = EventName::new(name).unwrap();
    assert_eq!(parsed.as_str(), name);
    assert!(EventName::is_valid(name));
}

#[parameterized(
    empty = { "" },
    colon = { "pipeline:complete" },
    space = { "user created" },
    dash = { "user-created" },
    wildcard = { "user.*" },
    non_ascii = { "événement" },
)]
fn invalid_event_names(name: &str) {
    let err = EventName::new(name).unwrap_err();
    assert!(matches!(err, EventError::InvalidName { .. }));
    assert!(!EventName::is_valid(name));
}

#[test]
fn event_name_parses_and_displays() {
    let name: EventName = "order.placed".parse().unwrap();
    assert_eq!(name.to_string(), "order.placed");
    assert_eq!(String::from(name), "order.placed");
}

#[test]
fn event_name_deserialization_validates() {
    let ok: EventName = serde_json::from_str("\"order.placed\"").unwrap();
    assert_eq!(ok.as_str(), "order.placed");

    let bad = serde_json::from_str::<EventName>("\"order placed\"");
    assert!(bad.is_err());
}

#[test]
fn new_event_is_empty_and_propagating() {
    let event = Event::named("foo").unwrap();

    assert_eq!(event.name().as_str(), "foo");
    assert!(!event.has_target());
    assert!(event.arguments().is_empty());
    assert!(!event.is_propagation_stopped());
    assert!(event.result().is_none());
}

#[test]
fn named_rejects_invalid_name() {
    assert!(Event::named("not valid").is_err());
}

#[test]
fn argument_returns_exact_stored_value() {
    let event = Event::named("user.created")
        .unwrap()
        .with_argument("id", 42)
        .with_argument("tags", json!(["admin", "beta"]));

    assert_eq!(event.argument("id").unwrap(), &json!(42));
    assert_eq!(event.argument("tags").unwrap(), &json!(["admin", "beta"]));
    assert!(event.has_argument("id"));
}

#[test]
fn missing_argument_is_not_found() {
    let event = Event::named("user.created").unwrap();

    let err = event.argument("missing").unwrap_err();
    assert!(matches!(err, EventError::ArgumentNotFound(ref key) if key == "missing"));
    assert_eq!(err.to_string(), "argument not found: missing");
}

#[test]
fn argument_as_decodes_typed_values() {
    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct User {
        id: u64,
        name: String,
    }

    let event = Event::named("user.created")
        .unwrap()
        .with_argument("user", json!({"id": 7, "name": "ada"}))
        .with_argument("count", 3);

    let user: User = event.argument_as("user").unwrap();
    assert_eq!(
        user,
        User {
            id: 7,
            name: "ada".to_string()
        }
    );
    assert_eq!(event.argument_as::<u32>("count").unwrap(), 3);
}

#[test]
fn argument_as_reports_type_mismatch() {
    let event = Event::named("foo").unwrap().with_argument("count", "three");

    let err = event.argument_as::<u32>("count").unwrap_err();
    assert!(matches!(err, EventError::ArgumentType { ref key, .. } if key == "count"));

    let err = event.argument_as::<u32>("absent").unwrap_err();
    assert!(matches!(err, EventError::ArgumentNotFound(_)));
}

#[test]
fn with_arguments_extends_map() {
    let event = Event::named("foo")
        .unwrap()
        .with_arguments([("a", 1), ("b", 2)])
        .with_argument("a", 10);

    assert_eq!(event.arguments().len(), 2);
    assert_eq!(event.argument("a").unwrap(), &json!(10));
}

#[test]
fn target_downcasts_to_stored_type() {
    struct Order {
        id: u32,
    }

    let event = Event::named("order.placed")
        .unwrap()
        .with_target(Order { id: 9 });

    assert!(event.has_target());
    assert_eq!(event.target::<Order>().map(|o| o.id), Some(9));
    assert!(event.target::<String>().is_none());
}

#[test]
fn shared_target_keeps_caller_handle() {
    let target: Target = Arc::new(String::from("session-1"));
    let event = Event::named("session.opened")
        .unwrap()
        .with_shared_target(Arc::clone(&target));

    assert!(Arc::ptr_eq(event.shared_target().unwrap(), &target));
    assert_eq!(event.target::<String>().unwrap(), "session-1");
}

#[test]
fn stop_propagation_is_irreversible() {
    let mut event = Event::named("foo").unwrap();

    event.stop_propagation();
    assert!(event.is_propagation_stopped());

    event.stop_propagation();
    assert!(event.is_propagation_stopped());
}

#[test]
fn result_can_be_replaced_and_taken() {
    let mut event = Event::named("foo").unwrap();

    event.set_result("first");
    event.set_result(json!({"ok": true}));
    assert_eq!(event.result(), Some(&json!({"ok": true})));

    assert_eq!(event.take_result(), Some(json!({"ok": true})));
    assert!(event.result().is_none());
}

#[test]
fn debug_hides_target_contents() {
    let event = Event::named("foo").unwrap().with_target(5_u8);
    let debug = format!("{:?}", event);

    assert!(debug.contains("has_target: true"));
    assert!(debug.contains("\"foo\""));
}
