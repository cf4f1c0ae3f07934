//! Circular avatar rendering.
//!
//! # Algorithm
//!
//! 1. Scale the source uniformly so it covers `size × size`
//! 2. Use the scaled bitmap as a repeating texture anchored at the origin
//! 3. Fill a circle of diameter `size` centred on the canvas, with edge
//!    coverage estimated by 4×4 supersampling
//!
//! The canvas starts fully transparent, so everything outside the circle
//! keeps alpha 0.

use crate::bitmap::{Bitmap, PixelFormat};

use super::{scale_to_fit, TransformError};

/// Supersampling grid per axis for edge pixels.
const SUBSAMPLES: u32 = 4;

/// Pixels further than this from the edge are fully in or out.
const HALF_DIAGONAL: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Render `source` as a `size × size` circular image.
///
/// # Errors
///
/// - [`TransformError::InvalidArgument`] if `size` is zero or the source is empty
/// - [`TransformError::AllocationFailed`] if the canvas cannot be allocated
pub fn create_circle_image(source: &Bitmap, size: u32) -> Result<Bitmap, TransformError> {
    if size == 0 {
        return Err(TransformError::InvalidArgument(
            "circle size must be positive".to_string(),
        ));
    }
    let target = i32::try_from(size)
        .map_err(|_| TransformError::InvalidArgument(format!("circle size {} is too large", size)))?;
    let mut canvas = Bitmap::blank(size, size, PixelFormat::Argb8888).ok_or(
        TransformError::AllocationFailed {
            width: size,
            height: size,
        },
    )?;

    let texture = scale_to_fit(source, target, target)?;
    let (tex_w, tex_h) = texture.dimensions();
    log::debug!(
        "circle {}px from {}x{} via {}x{} texture",
        size,
        source.width,
        source.height,
        tex_w,
        tex_h
    );

    let radius = size as f64 / 2.0;
    for y in 0..size {
        for x in 0..size {
            let coverage = circle_coverage(x, y, radius);
            if coverage <= 0.0 {
                continue;
            }
            let [r, g, b, a] = texture.pixel_rgba(x % tex_w, y % tex_h);
            let alpha = (a as f64 * coverage).round() as u8;
            let idx = (y as usize * size as usize + x as usize) * 4;
            canvas.pixels[idx..idx + 4].copy_from_slice(&[r, g, b, alpha]);
        }
    }

    Ok(canvas)
}

/// Fraction of pixel `(x, y)` inside the circle of `radius` centred at `(radius, radius)`.
fn circle_coverage(x: u32, y: u32, radius: f64) -> f64 {
    let dx = x as f64 + 0.5 - radius;
    let dy = y as f64 + 0.5 - radius;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance <= radius - HALF_DIAGONAL {
        return 1.0;
    }
    if distance >= radius + HALF_DIAGONAL {
        return 0.0;
    }

    let r2 = radius * radius;
    let step = 1.0 / SUBSAMPLES as f64;
    let mut inside = 0u32;
    for sy in 0..SUBSAMPLES {
        for sx in 0..SUBSAMPLES {
            let px = x as f64 + (sx as f64 + 0.5) * step - radius;
            let py = y as f64 + (sy as f64 + 0.5) * step - radius;
            if px * px + py * py <= r2 {
                inside += 1;
            }
        }
    }
    inside as f64 / (SUBSAMPLES * SUBSAMPLES) as f64
}
