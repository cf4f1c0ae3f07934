//! Bitmap encoding.
//!
//! This module provides:
//! - [`compress`]: PNG (lossless) or JPEG (lossy, quality 1-100) output
//! - [`encode_jpeg`]: JPEG from raw RGB rows
//! - [`bitmap_to_base64`] / [`base64_to_bitmap`]: PNG wrapped in standard Base64
//!
//! # Examples
//!
//! ```ignore
//! use utilkit_core::encode::{compress, CompressFormat};
//!
//! let jpeg = compress(&bitmap, CompressFormat::Jpeg, 90)?;
//! println!("Encoded {} bytes", jpeg.len());
//! ```

mod compress;
mod transport;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use compress::{compress, encode_jpeg, encode_png};
pub use transport::{base64_to_bitmap, bitmap_to_base64};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output container for [`compress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressFormat {
    /// Lossless; quality is ignored.
    #[default]
    Png,
    /// Lossy; alpha is dropped.
    Jpeg,
}

impl CompressFormat {
    /// MIME type of the encoded bytes.
    pub fn mime_type(self) -> &'static str {
        match self {
            CompressFormat::Png => "image/png",
            CompressFormat::Jpeg => "image/jpeg",
        }
    }
}

impl From<u8> for CompressFormat {
    fn from(value: u8) -> Self {
        match value {
            1 => CompressFormat::Jpeg,
            _ => CompressFormat::Png,
        }
    }
}
