//! Per-event transformation rules.
//!
//! Dispatches on the event name:
//!
//! - `customers`: derives `username` from the local part of `email`, in place.
//! - `orders`: passes the order through untouched and fans out a derived
//!   `order_events` record.
//! - anything else: passes through unchanged.
//!
//! The transform is total. Missing or null properties degrade to empty
//! strings or nulls instead of failing.

pub mod output;
pub mod status;

use crate::event::{Event, Properties};

pub use output::Transformed;
pub use status::{event_type_for_status, normalize_status, STATUS_EVENT_TYPES, UNKNOWN_STATUS};

/// Name of the record fanned out for every order.
pub const ORDER_EVENTS: &str = "order_events";

/// Closed set of event types the transformer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Customers,
    Orders,
    Other,
}

impl EventKind {
    /// Resolve an event name. Unknown names map to [`EventKind::Other`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "customers" => EventKind::Customers,
            "orders" => EventKind::Orders,
            _ => EventKind::Other,
        }
    }
}

/// Trait for event transformations
///
/// Implementations receive ownership of one event and hand back whatever
/// should flow downstream. They hold no per-call state and may be shared
/// across threads.
pub trait EventTransform: Send + Sync {
    fn apply(&self, event: Event) -> Transformed;

    /// Name used in logs.
    fn name(&self) -> &str {
        "transform"
    }
}

/// Closures can be used directly as transforms
impl<F> EventTransform for F
where
    F: Fn(Event) -> Transformed + Send + Sync,
{
    fn apply(&self, event: Event) -> Transformed {
        self(event)
    }
}

/// The customer/order transformation rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transformer;

impl Transformer {
    pub fn new() -> Self {
        Self
    }
}

impl EventTransform for Transformer {
    fn apply(&self, event: Event) -> Transformed {
        transform(event)
    }

    fn name(&self) -> &str {
        "customers_orders"
    }
}

/// Pass-through transform. Every event comes back unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl EventTransform for Identity {
    fn apply(&self, event: Event) -> Transformed {
        Transformed::Single(event)
    }

    fn name(&self) -> &str {
        "identity"
    }
}

/// Transform one event.
///
/// # Example
///
/// ```
/// use event_transform::{transform, Event, Properties};
///
/// let event = Event::new("customers", Properties::new().with_value("email", "jane@example.com"));
/// let out = transform(event).into_events();
///
/// assert_eq!(out[0].properties().get_str_or_empty("username"), "jane");
/// ```
pub fn transform(event: Event) -> Transformed {
    match EventKind::from_name(event.name()) {
        EventKind::Customers => Transformed::Single(apply_customer(event)),
        EventKind::Orders => {
            let derived = derive_order_event(event.properties());
            tracing::debug!(
                event_type = %derived.properties().get_str_or_empty("event_type"),
                "Fanning out order event"
            );
            Transformed::FanOut(vec![event, derived])
        }
        EventKind::Other => Transformed::Single(event),
    }
}

/// Local part of an email address: everything before the first `@`.
///
/// `None` when there is no `@` or the local part would be empty.
pub fn derive_username(email: &str) -> Option<&str> {
    match email.find('@') {
        Some(at) if at > 0 => Some(&email[..at]),
        _ => None,
    }
}

fn apply_customer(mut event: Event) -> Event {
    let username = derive_username(event.properties().get_str_or_empty("email")).map(str::to_owned);
    if let Some(username) = username {
        event.properties_mut().insert("username", username);
    }
    event
}

/// Build the `order_events` record for an order's properties.
///
/// The result carries exactly `order_id`, `customer_id`, `event_type` and
/// `event_time`, and shares nothing with the input mapping.
pub fn derive_order_event(order: &Properties) -> Event {
    let event_type = event_type_for_status(order.get_str_or_empty("status"));
    let event_time = order
        .get_present("updated_at")
        .cloned()
        .unwrap_or_else(|| order.get_or_null("created_at"));

    let properties = Properties::new()
        .with_value("order_id", order.get_or_null("id"))
        .with_value("customer_id", order.get_or_null("customer_id"))
        .with_value("event_type", event_type)
        .with_value("event_time", event_time);

    Event::new(ORDER_EVENTS, properties)
}
