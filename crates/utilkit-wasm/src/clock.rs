//! Clock WASM bindings.

use utilkit_core::clock;
use wasm_bindgen::prelude::*;

/// Milliseconds since the Unix epoch as a JavaScript number.
#[wasm_bindgen]
pub fn current_time_millis() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        clock::current_time_millis() as f64
    }
}

/// The current local time as `yyyyMMddHHmmss`.
#[wasm_bindgen]
pub fn timestamp_string() -> String {
    clock::timestamp_string()
}

/// Format epoch milliseconds as `yyyyMMddHHmmss` in UTC; empty when out of range.
#[wasm_bindgen]
pub fn format_millis_utc(millis: f64) -> String {
    if !millis.is_finite() {
        return String::new();
    }
    clock::format_millis_utc(millis as i64).unwrap_or_default()
}
