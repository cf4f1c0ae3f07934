//! Mirroring by signed scale factors.

use crate::bitmap::Bitmap;
use crate::decode::FilterType;

use super::{apply_matrix, Matrix, TransformError};

/// Scale a bitmap by integer factors, mirroring on negative ones.
///
/// `flip(b, -1, 1)` mirrors horizontally, `flip(b, 1, -1)` vertically and
/// `flip(b, -1, -1)` both. Unit factors move whole pixels, so the result is
/// pixel-exact and applying the same flip twice returns the original.
///
/// # Errors
///
/// Returns [`TransformError::InvalidArgument`] if either factor is zero or the
/// bitmap is empty.
pub fn flip(bitmap: &Bitmap, sx: i32, sy: i32) -> Result<Bitmap, TransformError> {
    if sx == 0 || sy == 0 {
        return Err(TransformError::InvalidArgument(format!(
            "flip factors must be non-zero, got ({}, {})",
            sx, sy
        )));
    }
    apply_matrix(bitmap, &Matrix::scale(sx as f64, sy as f64), FilterType::Bilinear)
}
