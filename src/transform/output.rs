//! Output shape of a single transform invocation.

use crate::event::Event;

/// Result of transforming one event.
///
/// Either the (possibly mutated) input event alone, or an ordered fan-out of
/// events. Consumers that only care about the events should iterate it; the
/// sequence is finite and consumed once.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed {
    Single(Event),
    FanOut(Vec<Event>),
}

impl Transformed {
    /// Number of events this output carries.
    pub fn len(&self) -> usize {
        match self {
            Transformed::Single(_) => 1,
            Transformed::FanOut(events) => events.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_fan_out(&self) -> bool {
        matches!(self, Transformed::FanOut(_))
    }

    /// Borrow the events in output order.
    pub fn events(&self) -> &[Event] {
        match self {
            Transformed::Single(event) => std::slice::from_ref(event),
            Transformed::FanOut(events) => events,
        }
    }

    pub fn into_events(self) -> Vec<Event> {
        match self {
            Transformed::Single(event) => vec![event],
            Transformed::FanOut(events) => events,
        }
    }
}

impl IntoIterator for Transformed {
    type Item = Event;
    type IntoIter = std::vec::IntoIter<Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_events().into_iter()
    }
}

impl From<Event> for Transformed {
    fn from(event: Event) -> Self {
        Transformed::Single(event)
    }
}
