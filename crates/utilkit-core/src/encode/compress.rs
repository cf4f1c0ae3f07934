//! PNG and JPEG output through the `image` crate's encoders.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};

use super::{CompressFormat, EncodeError};
use crate::bitmap::{composite_over_black, Bitmap, PixelFormat};

/// Encode a bitmap.
///
/// `quality` only applies to JPEG and is clamped to 1-100. PNG output is
/// lossless: `Argb8888` bitmaps are written as RGBA, `Rgb565` bitmaps as RGB.
/// JPEG has no alpha channel, so pixels are composited over black first.
///
/// # Errors
///
/// - [`EncodeError::InvalidDimensions`] for an empty bitmap
/// - [`EncodeError::InvalidPixelData`] if the buffer does not match the dimensions
/// - [`EncodeError::EncodingFailed`] if the encoder reports an error
pub fn compress(bitmap: &Bitmap, format: CompressFormat, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = bitmap.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let rgba = bitmap.to_rgba_image().ok_or(EncodeError::InvalidPixelData {
        expected: width as usize * height as usize * bitmap.format.bytes_per_pixel(),
        actual: bitmap.pixels.len(),
    })?;

    match format {
        CompressFormat::Png if bitmap.format == PixelFormat::Argb8888 => {
            encode_png(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)
        }
        CompressFormat::Png => {
            let rgb = DynamicImage::ImageRgba8(rgba).into_rgb8();
            encode_png(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
        }
        CompressFormat::Jpeg => {
            let rgb: Vec<u8> = rgba
                .pixels()
                .flat_map(|px| composite_over_black(px.0))
                .collect();
            encode_jpeg(&rgb, width, height, quality)
        }
    }
}

/// Encode raw rows as PNG.
///
/// `color` must be `Rgb8` or `Rgba8`.
pub fn encode_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    color: ExtendedColorType,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let channels = match color {
        ExtendedColorType::Rgb8 => 3,
        ExtendedColorType::Rgba8 => 4,
        other => {
            return Err(EncodeError::EncodingFailed(format!(
                "unsupported PNG color type {:?}",
                other
            )))
        }
    };
    let expected = width as usize * height as usize * channels;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality, clamped to 1-100
///
/// # Example
///
/// ```
/// use utilkit_core::encode::encode_jpeg;
///
/// let pixels = vec![128u8; 100 * 100 * 3];
/// let jpeg = encode_jpeg(&pixels, 100, 100, 90).unwrap();
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);
    log::trace!("jpeg {}x{} at quality {}", width, height, quality);

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
