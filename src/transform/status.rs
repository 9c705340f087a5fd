//! Order status lookup table.

/// `event_type` emitted for any status missing from [`STATUS_EVENT_TYPES`].
pub const UNKNOWN_STATUS: &str = "unknown_status";

/// Normalized order status -> `event_type` of the derived `order_events` record.
pub const STATUS_EVENT_TYPES: &[(&str, &str)] = &[
    ("placed", "order_placed"),
    ("shipped", "order_shipped"),
    ("delivered", "order_delivered"),
    ("cancelled", "order_cancelled"),
];

/// Trim surrounding whitespace and lower-case a raw status.
pub fn normalize_status(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Map a raw order status to its `event_type`.
///
/// Matching is case- and whitespace-insensitive. Empty or unmapped statuses
/// yield [`UNKNOWN_STATUS`].
pub fn event_type_for_status(raw: &str) -> &'static str {
    let status = normalize_status(raw);
    STATUS_EVENT_TYPES
        .iter()
        .find(|(known, _)| *known == status)
        .map(|(_, event_type)| *event_type)
        .unwrap_or(UNKNOWN_STATUS)
}
