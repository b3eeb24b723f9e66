use trialmap::events::{EventSink, UiEvent};
use wasm_bindgen::JsValue;

/// Writes analytics events to the browser console.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&self, event: &UiEvent) {
        let line = format!(
            "[analytics] {} / {} / {}",
            event.category, event.action, event.label
        );
        web_sys::console::log_1(&JsValue::from_str(&line));
    }
}
