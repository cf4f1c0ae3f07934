//! Bitmap encoding WASM bindings.
//!
//! # Functions
//!
//! - [`compress`] - Encode a bitmap as PNG or JPEG
//! - [`encode_jpeg`] - Encode raw RGB rows as JPEG
//! - [`bitmap_to_base64`] - PNG-encode a bitmap into Base64 text
//! - [`base64_to_bitmap`] - Decode Base64 text back into a bitmap
//!
//! # Example
//!
//! ```typescript
//! import { compress, bitmap_to_base64 } from '@utilkit/wasm';
//!
//! const jpegBytes = compress(bitmap, 1, 90);
//! img.src = `data:image/png;base64,${bitmap_to_base64(bitmap)}`;
//! ```

use crate::types::{js_error, JsBitmap};
use utilkit_core::encode::{self, CompressFormat};
use wasm_bindgen::prelude::*;

/// Encode a bitmap.
///
/// # Arguments
///
/// * `format` - 0 = PNG (lossless), 1 = JPEG
/// * `quality` - JPEG quality 1-100; ignored for PNG
#[wasm_bindgen]
pub fn compress(image: &JsBitmap, format: u8, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::compress(image.bitmap(), CompressFormat::from(format), quality).map_err(js_error)
}

/// Encode RGB pixel data (3 bytes per pixel, row-major) to JPEG bytes.
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(js_error)
}

#[wasm_bindgen]
pub fn bitmap_to_base64(image: &JsBitmap) -> Result<String, JsValue> {
    encode::bitmap_to_base64(image.bitmap()).map_err(js_error)
}

/// Decode Base64 text (whitespace allowed) holding an encoded image.
#[wasm_bindgen]
pub fn base64_to_bitmap(text: &str) -> Result<JsBitmap, JsValue> {
    encode::base64_to_bitmap(text)
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}
