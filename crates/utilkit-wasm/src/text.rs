//! Text validation, codec and hit-test WASM bindings.

use crate::types::js_error;
use utilkit_core::text;
use utilkit_core::view::{self, ViewBounds};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn is_mobile(text: &str) -> bool {
    text::is_mobile(text)
}

#[wasm_bindgen]
pub fn is_email(text: &str) -> bool {
    text::is_email(text)
}

#[wasm_bindgen]
pub fn is_http_url(text: &str) -> bool {
    text::is_http_url(text)
}

#[wasm_bindgen]
pub fn is_ip(text: &str) -> bool {
    text::is_ip(text)
}

#[wasm_bindgen]
pub fn contains_chinese(text: &str) -> bool {
    text::contains_chinese(text)
}

#[wasm_bindgen]
pub fn is_id_number(text: &str) -> bool {
    text::is_id_number(text)
}

/// Decode a hex string of even length (either case) into bytes.
#[wasm_bindgen]
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, JsValue> {
    text::hex_to_bytes(hex).map_err(js_error)
}

#[wasm_bindgen]
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    text::bytes_to_hex(bytes)
}

/// Four little-endian bytes of `value`.
#[wasm_bindgen]
pub fn int_to_bytes(value: i32) -> Vec<u8> {
    text::int_to_bytes(value).to_vec()
}

/// Read a little-endian i32 from the first four bytes.
#[wasm_bindgen]
pub fn bytes_to_int(bytes: &[u8]) -> Result<i32, JsValue> {
    text::bytes_to_int(bytes).map_err(js_error)
}

/// Replace `\uXXXX` escapes with the characters they name.
#[wasm_bindgen]
pub fn unescape_unicode(text: &str) -> String {
    text::unescape_unicode(text)
}

#[wasm_bindgen]
pub fn format_decimals(places: usize, value: f64) -> String {
    text::format_decimals(places, value)
}

/// Whether a screen-space touch lands inside a view's rectangle (edges included).
#[wasm_bindgen]
pub fn is_touch_in_view(
    raw_x: f32,
    raw_y: f32,
    left: i32,
    top: i32,
    width: u32,
    height: u32,
) -> bool {
    view::is_touch_in_view(raw_x, raw_y, &ViewBounds::new(left, top, width, height))
}
