//! WASM-compatible wrapper types for bitmaps.
//!
//! `JsBitmap` owns a core [`Bitmap`] and hands JavaScript copies of its
//! pixels on request. Small integer codes select pixel formats and filters
//! across the boundary.

use std::fmt::Display;

use utilkit_core::bitmap::{Bitmap, PixelFormat};
use utilkit_core::decode::FilterType;
use wasm_bindgen::prelude::*;

/// A bitmap wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsBitmap {
    inner: Bitmap,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Wrap straight RGBA pixels (4 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsBitmap, JsValue> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(JsValue::from_str(&format!(
                "expected {} bytes of RGBA data, got {}",
                expected,
                pixels.len()
            )));
        }
        Ok(JsBitmap {
            inner: Bitmap::new(width, height, PixelFormat::Argb8888, pixels),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Pixel format code: 0 = ARGB_8888, 1 = RGB_565.
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> u8 {
        format_to_u8(self.inner.format)
    }

    /// Number of bytes in the native pixel buffer.
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Native pixel buffer (RGBA, or little-endian RGB565 words). Copies.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Pixels expanded to straight RGBA, ready for `ImageData`. Copies.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        match self.inner.to_rgba_image() {
            Some(img) => img.into_raw(),
            None => Vec::new(),
        }
    }

    /// Copy into another pixel format (0 = ARGB_8888, 1 = RGB_565).
    pub fn convert(&self, format: u8) -> Result<JsBitmap, JsValue> {
        self.inner
            .clone()
            .into_format(format_from_u8(format))
            .map(JsBitmap::from_bitmap)
            .ok_or_else(|| JsValue::from_str("pixel buffer does not match dimensions"))
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsBitmap {
    pub(crate) fn from_bitmap(inner: Bitmap) -> Self {
        Self { inner }
    }

    pub(crate) fn bitmap(&self) -> &Bitmap {
        &self.inner
    }
}

/// Convert a u8 filter code to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest
/// - 1 = Bilinear
/// - 2 = Lanczos3
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// Pixel format code used across the boundary; unknown values mean ARGB_8888.
pub(crate) fn format_from_u8(value: u8) -> PixelFormat {
    match value {
        1 => PixelFormat::Rgb565,
        _ => PixelFormat::Argb8888,
    }
}

pub(crate) fn format_to_u8(format: PixelFormat) -> u8 {
    match format {
        PixelFormat::Argb8888 => 0,
        PixelFormat::Rgb565 => 1,
    }
}

/// Render any core error as a JavaScript string value.
pub(crate) fn js_error<E: Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}
