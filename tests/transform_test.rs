//! Integration tests for the customer/order transform

use event_transform::{transform, Event, EventTransform, Properties, Transformed, Transformer};
use serde_json::{json, Value};

fn event(name: &str, props: Value) -> Event {
    serde_json::from_value(json!({"name": name, "properties": props})).unwrap()
}

#[test]
fn test_customer_username_from_email() {
    let out = transform(event("customers", json!({"email": "jane@example.com"})));

    match out {
        Transformed::Single(e) => {
            assert_eq!(e.name(), "customers");
            assert_eq!(e.properties().get("username"), Some(&json!("jane")));
        }
        other => panic!("expected a single event, got {:?}", other),
    }
}

#[test]
fn test_customer_with_empty_local_part() {
    let input = event("customers", json!({"email": "@example.com"}));

    let out = transform(input.clone()).into_events();

    assert_eq!(out, vec![input]);
    assert!(!out[0].properties().contains_key("username"));
}

#[test]
fn test_customer_keeps_other_properties() {
    let input = event(
        "customers",
        json!({"id": 3, "email": "first.last@corp.io", "country": "NZ"}),
    );

    let out = transform(input.clone()).into_events();
    let props = out[0].properties();

    assert_eq!(props.len(), 4);
    for (key, value) in input.properties().iter() {
        assert_eq!(props.get(key), Some(value));
    }
    assert_eq!(props.get_str_or_empty("username"), "first.last");
}

#[test]
fn test_shipped_order_fan_out() {
    let input = event(
        "orders",
        json!({"id": 42, "customer_id": 7, "status": "Shipped", "updated_at": "2024-01-02"}),
    );

    let out = transform(input.clone()).into_events();

    assert_eq!(
        out,
        vec![
            input,
            event(
                "order_events",
                json!({
                    "order_id": 42,
                    "customer_id": 7,
                    "event_type": "order_shipped",
                    "event_time": "2024-01-02"
                })
            ),
        ]
    );
}

#[test]
fn test_unknown_status_order_fan_out() {
    let input = event("orders", json!({"id": 1, "status": "returned", "created_at": "2024-01-01"}));

    let out = transform(input.clone()).into_events();

    assert_eq!(out[0], input);
    assert_eq!(
        serde_json::to_value(out[1].properties()).unwrap(),
        json!({
            "order_id": 1,
            "customer_id": null,
            "event_type": "unknown_status",
            "event_time": "2024-01-01"
        })
    );
}

#[test]
fn test_order_status_variants() {
    let cases = [
        (json!(" Placed "), "order_placed"),
        (json!("PLACED"), "order_placed"),
        (json!("delivered"), "order_delivered"),
        (json!("Cancelled"), "order_cancelled"),
        (Value::Null, "unknown_status"),
    ];

    for (status, expected) in cases {
        let out = transform(event("orders", json!({"status": status}))).into_events();
        assert_eq!(out[1].properties().get_str_or_empty("event_type"), expected);
    }

    let missing = transform(event("orders", json!({}))).into_events();
    assert_eq!(missing[1].properties().get_str_or_empty("event_type"), "unknown_status");
    assert_eq!(missing[1].properties().get("event_time"), Some(&Value::Null));
}

#[test]
fn test_other_event_unchanged() {
    let input = event("invoices", json!({"amount": 10}));

    assert_eq!(Transformer::new().apply(input.clone()), Transformed::Single(input));
}

#[test]
fn test_transformer_shared_across_threads() {
    let transformer = std::sync::Arc::new(Transformer::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let transformer = transformer.clone();
            std::thread::spawn(move || {
                let email = format!("user{}@example.com", i);
                let props = Properties::new().with_value("email", email);
                transformer.apply(Event::new("customers", props)).into_events()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let out = handle.join().unwrap();
        assert_eq!(out[0].properties().get_str_or_empty("username"), format!("user{}", i));
    }
}
