//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bitmap::PixelFormat;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The data is not in a recognized image container.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoder hit the configured allocation limit.
    #[error("Out of memory during decoding")]
    OutOfMemory,

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(String),

    /// No bytes were supplied.
    #[error("Empty input")]
    EmptyInput,

    /// The requested region does not intersect the image.
    #[error("Region ({left}, {top}, {right}, {bottom}) is outside the {width}x{height} image")]
    InvalidRegion {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        width: u32,
        height: u32,
    },
}

impl From<image::ImageError> for DecodeError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Limits(_) => DecodeError::OutOfMemory,
            image::ImageError::Unsupported(_) => DecodeError::InvalidFormat,
            image::ImageError::IoError(e) => DecodeError::IoError(e.to_string()),
            other => DecodeError::CorruptedFile(other.to_string()),
        }
    }
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError::IoError(err.to_string())
    }
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Decoder configuration.
///
/// `sample_size` is a downsampling divisor applied during decode. Only powers
/// of two are honoured; other values are rounded down to the nearest power of
/// two and anything below 1 is treated as 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Downsampling divisor.
    pub sample_size: u32,
    /// Only read the header; no pixel buffer is produced.
    pub bounds_only: bool,
    /// Pixel format of the decoded bitmap.
    pub preferred_format: PixelFormat,
    /// Apply the EXIF orientation tag after decoding.
    pub apply_orientation: bool,
    /// Maximum bytes the decoder may allocate, `None` for the decoder default.
    pub max_alloc: Option<u64>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            sample_size: 1,
            bounds_only: false,
            preferred_format: PixelFormat::Argb8888,
            apply_orientation: false,
            max_alloc: None,
        }
    }
}

impl DecodeOptions {
    /// Options for a header-only pass.
    pub fn bounds() -> Self {
        Self {
            bounds_only: true,
            ..Self::default()
        }
    }

    /// Options for a pixel pass at the given divisor.
    pub fn with_sample_size(sample_size: u32) -> Self {
        Self {
            sample_size,
            ..Self::default()
        }
    }

    /// The divisor actually used by the decoder.
    pub fn effective_sample_size(&self) -> u32 {
        if self.sample_size <= 1 {
            1
        } else {
            1 << (31 - self.sample_size.leading_zeros())
        }
    }
}

/// Result of a bounds-only decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBounds {
    /// Stored width in pixels (before orientation correction).
    pub width: u32,
    /// Stored height in pixels (before orientation correction).
    pub height: u32,
    /// Container format, e.g. `"png"` or `"jpeg"`.
    pub format_name: String,
    /// EXIF orientation, `Normal` when absent.
    pub orientation: Orientation,
}
