//! Exact-size resampling of decoded bitmaps.
//!
//! Resizing goes through the `image` crate's separable filters and always
//! returns a new bitmap in the source pixel format.

use super::{DecodeError, FilterType};
use crate::bitmap::Bitmap;

/// Resize a bitmap to exact dimensions.
///
/// # Errors
///
/// - [`DecodeError::InvalidRegion`] if either target dimension is zero
/// - [`DecodeError::CorruptedFile`] if the source pixel buffer does not match
///   its dimensions
pub fn resize(
    bitmap: &Bitmap,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Bitmap, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidRegion {
            left: 0,
            top: 0,
            right: width.min(i32::MAX as u32) as i32,
            bottom: height.min(i32::MAX as u32) as i32,
            width: bitmap.width,
            height: bitmap.height,
        });
    }

    if bitmap.width == width && bitmap.height == height {
        return Ok(bitmap.clone());
    }

    let rgba = bitmap
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());

    Ok(Bitmap::from_rgba_image_as(resized, bitmap.format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::PixelFormat;

    fn create_test_bitmap(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
                pixels.push(255);
            }
        }
        Bitmap::new(width, height, PixelFormat::Argb8888, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let bmp = create_test_bitmap(100, 50);
        let resized = resize(&bmp, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.dimensions(), (50, 25));
        assert_eq!(resized.pixels.len(), 50 * 25 * 4);
    }

    #[test]
    fn test_resize_same_dimensions_is_copy() {
        let bmp = create_test_bitmap(100, 50);
        let resized = resize(&bmp, 100, 50, FilterType::Bilinear).unwrap();
        assert_eq!(resized, bmp);
    }

    #[test]
    fn test_resize_upscale() {
        let bmp = create_test_bitmap(50, 25);
        let resized = resize(&bmp, 100, 50, FilterType::Lanczos3).unwrap();
        assert_eq!(resized.dimensions(), (100, 50));
    }

    #[test]
    fn test_resize_keeps_rgb565() {
        let bmp = create_test_bitmap(40, 20).into_format(PixelFormat::Rgb565).unwrap();
        let resized = resize(&bmp, 20, 10, FilterType::Bilinear).unwrap();

        assert_eq!(resized.format, PixelFormat::Rgb565);
        assert_eq!(resized.pixels.len(), 20 * 10 * 2);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let bmp = create_test_bitmap(100, 50);

        assert!(resize(&bmp, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&bmp, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_mismatched_buffer_error() {
        let bmp = Bitmap {
            width: 10,
            height: 10,
            format: PixelFormat::Argb8888,
            pixels: vec![0; 12],
        };
        let result = resize(&bmp, 5, 5, FilterType::Nearest);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_all_filter_types() {
        let bmp = create_test_bitmap(100, 50);

        for filter in [FilterType::Nearest, FilterType::Bilinear, FilterType::Lanczos3] {
            let resized = resize(&bmp, 50, 25, filter).unwrap();
            assert_eq!(resized.dimensions(), (50, 25));
        }
    }
}
