//! utilkit WASM - WebAssembly bindings for utilkit
//!
//! This crate exposes the utilkit-core functionality to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `types` - `JsBitmap`, the bitmap handle shared by every binding
//! - `decode` - Bounds, full, sampled and region decoding plus resizing
//! - `transform` - Scale, flip, rotate, crop, circle avatars and raw matrices
//! - `encode` - PNG/JPEG compression and Base64 transport
//! - `crypto` - SHA-512 and Triple-DES
//! - `text` - Validators, hex/int codecs, Unicode unescaping and touch hit tests
//! - `clock` - Epoch milliseconds and compact timestamps
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_scaled, create_circle_image, bitmap_to_base64 } from '@utilkit/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const avatar = create_circle_image(decode_scaled(bytes, 128, 128), 128);
//! img.src = `data:image/png;base64,${bitmap_to_base64(avatar)}`;
//! ```

use wasm_bindgen::prelude::*;

mod clock;
mod crypto;
mod decode;
mod encode;
mod logging;
mod text;
mod transform;
mod types;

// Re-export public types
pub use clock::{current_time_millis, format_millis_utc, timestamp_string};
pub use crypto::{decrypt, encrypt, generate_key, sha512_hex, sha512_hex_str};
pub use decode::{
    bitmap_from_bytes, calculate_in_sample_size, decode_bounds, decode_bytes, decode_region,
    decode_scaled, resize,
};
pub use encode::{base64_to_bitmap, bitmap_to_base64, compress, encode_jpeg};
pub use text::{
    bytes_to_hex, bytes_to_int, contains_chinese, format_decimals, hex_to_bytes, int_to_bytes,
    is_email, is_http_url, is_id_number, is_ip, is_mobile, is_touch_in_view, unescape_unicode,
};
pub use transform::{
    apply_matrix, compute_rotated_bounds, create_circle_image, crop, flip, rotate, scale_to_fit,
};
pub use types::JsBitmap;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::init(log::LevelFilter::Info);
}

/// Change how much of the core crate's logging reaches the console.
///
/// 0 = off, 1 = error, 2 = warn, 3 = info, 4 = debug, anything higher = trace.
#[wasm_bindgen]
pub fn set_log_level(level: u8) {
    let filter = match level {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    logging::init(filter);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_avatar_round_trip() {
        let image = JsBitmap::new(12, 8, [10u8, 20, 30, 255].repeat(96)).unwrap();
        let avatar = create_circle_image(&image, 8).unwrap();
        let text = bitmap_to_base64(&avatar).unwrap();
        let restored = base64_to_bitmap(&text).unwrap();
        assert_eq!((restored.width(), restored.height()), (8, 8));
    }
}
