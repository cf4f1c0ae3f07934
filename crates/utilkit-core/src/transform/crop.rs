//! Rectangular cropping in pixel coordinates.
//!
//! Regions are clipped to the bitmap before copying, so partially
//! out-of-bounds requests yield the overlapping part. Rows are copied as raw
//! bytes and the pixel format is preserved.

use crate::bitmap::{Bitmap, Region};

use super::TransformError;

/// Copy `region` out of a bitmap.
///
/// # Errors
///
/// Returns [`TransformError::InvalidArgument`] if the region does not overlap
/// the bitmap or the pixel buffer does not match its dimensions.
///
/// # Example
///
/// ```
/// use utilkit_core::bitmap::{Bitmap, PixelFormat, Region};
/// use utilkit_core::transform::crop;
///
/// let bmp = Bitmap::new(100, 100, PixelFormat::Argb8888, vec![128u8; 100 * 100 * 4]);
/// let cropped = crop(&bmp, Region::new(25, 25, 75, 75)).unwrap();
/// assert_eq!(cropped.dimensions(), (50, 50));
/// ```
pub fn crop(bitmap: &Bitmap, region: Region) -> Result<Bitmap, TransformError> {
    let clipped = region.clip_to(bitmap.width, bitmap.height).ok_or_else(|| {
        TransformError::InvalidArgument(format!(
            "region {:?} does not overlap the {}x{} bitmap",
            region, bitmap.width, bitmap.height
        ))
    })?;

    let bpp = bitmap.format.bytes_per_pixel();
    let src_stride = bitmap.width as usize * bpp;
    if bitmap.pixels.len() != src_stride * bitmap.height as usize {
        return Err(TransformError::InvalidArgument(
            "pixel buffer size mismatch".to_string(),
        ));
    }

    let (out_w, out_h) = (clipped.width(), clipped.height());
    let row_len = out_w as usize * bpp;
    let mut pixels = Vec::with_capacity(row_len * out_h as usize);
    for y in clipped.top as usize..clipped.bottom as usize {
        let start = y * src_stride + clipped.left as usize * bpp;
        pixels.extend_from_slice(&bitmap.pixels[start..start + row_len]);
    }

    Ok(Bitmap::new(out_w, out_h, bitmap.format, pixels))
}
