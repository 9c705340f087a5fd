//! # event_transform: per-record event transformation
//!
//! One pipeline step that takes a single structured event (a name plus a flat
//! property mapping) and returns either that event or an ordered fan-out of
//! events.
//!
//! ## Rules
//!
//! - **customers**: `username` is set to the local part of `email` when there
//!   is a non-empty one. The event is mutated in place.
//! - **orders**: the original order is returned unmodified, followed by a new
//!   `order_events` record with `order_id`, `customer_id`, `event_type` and
//!   `event_time`.
//! - **anything else**: returned unchanged.
//!
//! ## Example
//!
//! ```
//! use event_transform::{transform, Event, Properties};
//!
//! let order = Event::new(
//!     "orders",
//!     Properties::new()
//!         .with_value("id", 42)
//!         .with_value("customer_id", 7)
//!         .with_value("status", "Shipped")
//!         .with_value("updated_at", "2024-01-02"),
//! );
//!
//! let events = transform(order).into_events();
//! assert_eq!(events.len(), 2);
//! assert_eq!(events[1].name(), "order_events");
//! assert_eq!(events[1].properties().get_str_or_empty("event_type"), "order_shipped");
//! ```

// Core modules
pub mod event;
pub mod transform;

// Stream harness
pub mod error;
pub mod serialization;
pub mod runner;

// Re-export key types
pub use event::{Event, Properties};
pub use transform::{
    derive_order_event, derive_username, event_type_for_status, transform, EventKind,
    EventTransform, Identity, Transformed, Transformer, ORDER_EVENTS,
};
pub use error::{Result, TransformError};
pub use serialization::{EventWriter, JsonArrayWriter, NdjsonReader, NdjsonWriter};
pub use runner::{OutputFormat, RunStats, Runner, RunnerConfig};
