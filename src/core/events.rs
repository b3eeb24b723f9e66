//! Analytics events emitted at the UI-event boundary.
//!
//! The kernel never emits anything itself; [`crate::dashboard::Dashboard`]
//! forwards user actions to whatever [`EventSink`] it was built with.

use std::sync::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::filter::FilterDimension;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UiEvent {
    pub category: String,
    pub action: String,
    pub label: String,
}

impl UiEvent {
    pub fn new(
        category: impl Into<String>,
        action: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            action: action.into(),
            label: label.into(),
        }
    }

    pub fn filter_changed(dim: FilterDimension, values: &[&str]) -> Self {
        Self::new("filter", format!("{} filter changed", dim.label()), values.join(", "))
    }

    pub fn pin_selected(id: &str) -> Self {
        Self::new("map", "Pin clicked", id)
    }

    pub fn volunteer_clicked() -> Self {
        Self::new(
            "volunteer",
            "How to volunteer clicked",
            "Popup button, how to volunteer",
        )
    }
}

/// Receiver for UI analytics events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &UiEvent);
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &UiEvent) {}
}

/// Logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &UiEvent) {
        tracing::info!(
            category = %event.category,
            action = %event.action,
            label = %event.label,
            "ui event"
        );
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<UiEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<UiEvent> {
        match self.events.lock() {
            Ok(v) => v.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.events.lock() {
            Ok(v) => v.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &UiEvent) {
        match self.events.lock() {
            Ok(mut v) => v.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for std::sync::Arc<S> {
    fn emit(&self, event: &UiEvent) {
        (**self).emit(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());
        sink.emit(&UiEvent::pin_selected("1"));
        sink.emit(&UiEvent::volunteer_clicked());
        assert_eq!(sink.len(), 2);

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].category, "map");
        assert_eq!(events[1].action, "How to volunteer clicked");
    }

    #[test]
    fn filter_event_names_dimension_and_values() {
        let e = UiEvent::filter_changed(FilterDimension::Sponsor, &["A", "B"]);
        assert_eq!(e.category, "filter");
        assert_eq!(e.action, "sponsor filter changed");
        assert_eq!(e.label, "A, B");
    }
}
