//! Rotation onto an expanded canvas.
//!
//! The output canvas is the axis-aligned bounding box of the rotated source,
//! so no content is clipped. Right-angle rotations move whole pixels and keep
//! the source pixel format; any other angle leaves transparent corners and
//! produces `Argb8888`.

use crate::bitmap::Bitmap;
use crate::decode::FilterType;

use super::{apply_matrix, mapped_dimensions, Matrix, TransformError};

/// Compute the dimensions of the bounding box for a rotated image.
///
/// # Example
///
/// ```
/// use utilkit_core::transform::compute_rotated_bounds;
///
/// // 90-degree rotation swaps dimensions
/// assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
/// // No rotation preserves dimensions
/// assert_eq!(compute_rotated_bounds(100, 50, 0.0), (100, 50));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let (w, h) = mapped_dimensions(width, height, &Matrix::rotate(angle_degrees));
    (w.max(1), h.max(1))
}

/// Rotate a bitmap clockwise by `degrees`.
///
/// # Errors
///
/// - [`TransformError::InvalidArgument`] for an empty bitmap or a non-finite angle
/// - [`TransformError::AllocationFailed`] if the expanded canvas is too large
pub fn rotate(bitmap: &Bitmap, degrees: f64) -> Result<Bitmap, TransformError> {
    if !degrees.is_finite() {
        return Err(TransformError::InvalidArgument(format!(
            "rotation angle must be finite, got {}",
            degrees
        )));
    }
    apply_matrix(bitmap, &Matrix::rotate(degrees), FilterType::Bilinear)
}
