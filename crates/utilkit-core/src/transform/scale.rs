//! Uniform cover scaling.

use crate::bitmap::Bitmap;
use crate::decode::FilterType;

use super::{apply_matrix, Matrix, TransformError};

/// Scale factor that makes a `width × height` image cover `target_width × target_height`.
///
/// The larger of the two axis ratios wins, so the result covers the target
/// on both axes and may overflow it on one.
pub fn cover_scale(width: u32, height: u32, target_width: u32, target_height: u32) -> f64 {
    let sx = target_width as f64 / width as f64;
    let sy = target_height as f64 / height as f64;
    sx.max(sy)
}

/// Scale a bitmap uniformly so it covers `target_width × target_height`.
///
/// Non-positive targets return an unchanged copy. The aspect ratio is kept,
/// so one output dimension matches the target and the other is at least as
/// large.
///
/// # Errors
///
/// Returns [`TransformError::InvalidArgument`] for an empty bitmap and
/// [`TransformError::AllocationFailed`] if the scaled canvas is too large.
pub fn scale_to_fit(
    bitmap: &Bitmap,
    target_width: i32,
    target_height: i32,
) -> Result<Bitmap, TransformError> {
    if target_width <= 0 || target_height <= 0 {
        return Ok(bitmap.clone());
    }
    if bitmap.is_empty() {
        return Err(TransformError::InvalidArgument("empty bitmap".to_string()));
    }

    let scale = cover_scale(
        bitmap.width,
        bitmap.height,
        target_width as u32,
        target_height as u32,
    );
    log::trace!(
        "scale_to_fit {}x{} -> {}x{} by {:.4}",
        bitmap.width,
        bitmap.height,
        target_width,
        target_height,
        scale
    );
    apply_matrix(bitmap, &Matrix::scale(scale, scale), FilterType::Bilinear)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::PixelFormat;

    fn solid(width: u32, height: u32) -> Bitmap {
        Bitmap::new(
            width,
            height,
            PixelFormat::Argb8888,
            [10u8, 20, 30, 255].repeat((width * height) as usize),
        )
    }

    #[test]
    fn test_cover_scale_picks_larger_ratio() {
        assert_eq!(cover_scale(200, 100, 50, 50), 0.5);
        assert_eq!(cover_scale(100, 200, 50, 50), 0.5);
        assert_eq!(cover_scale(10, 10, 40, 20), 4.0);
    }

    #[test]
    fn test_landscape_downscale() {
        let out = scale_to_fit(&solid(200, 100), 50, 50).unwrap();
        assert_eq!(out.dimensions(), (100, 50));
    }

    #[test]
    fn test_portrait_upscale() {
        let out = scale_to_fit(&solid(10, 20), 40, 40).unwrap();
        assert_eq!(out.dimensions(), (40, 80));
    }

    #[test]
    fn test_non_positive_target_returns_copy() {
        let bmp = solid(7, 3);
        assert_eq!(scale_to_fit(&bmp, 0, 10).unwrap(), bmp);
        assert_eq!(scale_to_fit(&bmp, 10, -1).unwrap(), bmp);
    }

    #[test]
    fn test_empty_bitmap_is_error() {
        let bmp = Bitmap::new(0, 0, PixelFormat::Argb8888, vec![]);
        assert!(matches!(
            scale_to_fit(&bmp, 10, 10),
            Err(TransformError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_keeps_format() {
        let bmp = solid(20, 20).into_format(PixelFormat::Rgb565).unwrap();
        let out = scale_to_fit(&bmp, 10, 10).unwrap();
        assert_eq!(out.format, PixelFormat::Rgb565);
    }
}
