//! Bitmap decoding.
//!
//! This module provides:
//! - Header-only bounds reads that allocate no pixel buffer
//! - Full and power-of-two sampled decodes from bytes or files
//! - The two-pass scaled decode for a target display size
//! - Rectangular region decodes into `Rgb565`
//! - Exact-size resampling
//!
//! # Examples
//!
//! ```ignore
//! use utilkit_core::decode::{decode_scaled_bytes, decode_bounds};
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let bounds = decode_bounds(&bytes)?;
//! let bitmap = decode_scaled_bytes(&bytes, 400, 300)?;
//! println!("{}x{} decoded as {}x{}", bounds.width, bounds.height, bitmap.width, bitmap.height);
//! ```

mod decoder;
mod orientation;
mod region;
mod resize;
mod sample;
mod stream;
mod types;

pub use decoder::{
    bitmap_from_bytes, decode_bounds, decode_bounds_file, decode_bytes, decode_file,
    decode_scaled_bytes, decode_scaled_file,
};
pub use orientation::get_orientation;
pub use region::decode_region;
pub use resize::resize;
pub use sample::calculate_in_sample_size;
pub use types::{DecodeError, DecodeOptions, FilterType, ImageBounds, Orientation};
