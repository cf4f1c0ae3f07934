//! Bitmap decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_bounds`] - Read width, height and format without decoding pixels
//! - [`decode_bytes`] - Decode with an options object
//! - [`decode_scaled`] - Two-pass decode sized for a display area
//! - [`bitmap_from_bytes`] - Decode with default options
//! - [`decode_region`] - Decode a rectangle of an encoded image as RGB_565
//! - [`calculate_in_sample_size`] - Power-of-two divisor for a display area
//! - [`resize`] - Resize a bitmap to exact dimensions
//!
//! # Example
//!
//! ```typescript
//! import { decode_bounds, decode_scaled } from '@utilkit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const { width, height } = decode_bounds(bytes);
//! const bitmap = decode_scaled(bytes, 400, 300);
//! console.log(`${width}x${height} -> ${bitmap.width}x${bitmap.height}`);
//! ```

use std::io::Cursor;

use crate::types::{filter_from_u8, js_error, JsBitmap};
use utilkit_core::bitmap::Region;
use utilkit_core::decode::{self, DecodeOptions};
use wasm_bindgen::prelude::*;

/// Read the image header and return `{ width, height, format_name, orientation }`.
#[wasm_bindgen]
pub fn decode_bounds(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let bounds = decode::decode_bounds(bytes).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&bounds).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode encoded bytes.
///
/// `options` is a plain object with any of `sample_size`, `bounds_only`,
/// `preferred_format` (`"Argb8888"` or `"Rgb565"`), `apply_orientation` and
/// `max_alloc`. Pass `undefined` for defaults.
///
/// # Errors
///
/// Returns an error if the options object is malformed or the bytes cannot be
/// decoded.
#[wasm_bindgen]
pub fn decode_bytes(bytes: &[u8], options: JsValue) -> Result<JsBitmap, JsValue> {
    let options: DecodeOptions = if options.is_undefined() || options.is_null() {
        DecodeOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    decode::decode_bytes(bytes, &options)
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}

/// Decode at the largest power-of-two reduction that still covers
/// `show_width × show_height`.
#[wasm_bindgen]
pub fn decode_scaled(bytes: &[u8], show_width: i32, show_height: i32) -> Result<JsBitmap, JsValue> {
    decode::decode_scaled_bytes(bytes, show_width, show_height)
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}

#[wasm_bindgen]
pub fn bitmap_from_bytes(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    decode::bitmap_from_bytes(bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}

/// Decode the rectangle `[left, right) × [top, bottom)` of an encoded image.
///
/// The rectangle is clipped to the image. The result is always RGB_565.
#[wasm_bindgen]
pub fn decode_region(
    bytes: &[u8],
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
) -> Result<JsBitmap, JsValue> {
    let mut cursor = Cursor::new(bytes);
    decode::decode_region(&mut cursor, Region::new(left, top, right, bottom))
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}

#[wasm_bindgen]
pub fn calculate_in_sample_size(width: u32, height: u32, req_width: i32, req_height: i32) -> u32 {
    decode::calculate_in_sample_size(width, height, req_width, req_height)
}

/// Resize a bitmap to exact dimensions.
///
/// Filter values: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3.
#[wasm_bindgen]
pub fn resize(image: &JsBitmap, width: u32, height: u32, filter: u8) -> Result<JsBitmap, JsValue> {
    decode::resize(image.bitmap(), width, height, filter_from_u8(filter))
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_bytes_rejects_garbage() {
        assert!(decode_bytes(&[0, 1, 2, 3], JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_bounds_returns_object() {
        let bitmap = JsBitmap::new(3, 2, vec![0u8; 24]).unwrap();
        let png = crate::encode::compress(&bitmap, 0, 100).unwrap();
        let value = decode_bounds(&png).unwrap();
        let width = js_sys::Reflect::get(&value, &JsValue::from_str("width")).unwrap();
        assert_eq!(width.as_f64(), Some(3.0));
    }
}
