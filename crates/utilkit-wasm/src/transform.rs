//! Geometric transform WASM bindings.
//!
//! Every function returns a new bitmap; the input is never modified.
//!
//! # Example
//!
//! ```typescript
//! import { scale_to_fit, rotate, create_circle_image } from '@utilkit/wasm';
//!
//! const cover = scale_to_fit(bitmap, 200, 200);
//! const turned = rotate(cover, 90);
//! const avatar = create_circle_image(turned, 96);
//! ```

use crate::types::{filter_from_u8, js_error, JsBitmap};
use utilkit_core::bitmap::Region;
use utilkit_core::transform::{self, Matrix};
use wasm_bindgen::prelude::*;

/// Scale uniformly so the bitmap covers `target_width × target_height`.
///
/// A non-positive target returns an unchanged copy.
#[wasm_bindgen]
pub fn scale_to_fit(
    image: &JsBitmap,
    target_width: i32,
    target_height: i32,
) -> Result<JsBitmap, JsValue> {
    transform::scale_to_fit(image.bitmap(), target_width, target_height)
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}

/// Mirror by the sign of each factor: `(-1, 1)` is horizontal, `(1, -1)` vertical.
#[wasm_bindgen]
pub fn flip(image: &JsBitmap, sx: i32, sy: i32) -> Result<JsBitmap, JsValue> {
    transform::flip(image.bitmap(), sx, sy)
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}

/// Rotate clockwise by `degrees`, expanding the canvas to keep every pixel.
#[wasm_bindgen]
pub fn rotate(image: &JsBitmap, degrees: f64) -> Result<JsBitmap, JsValue> {
    transform::rotate(image.bitmap(), degrees)
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}

/// Output `[width, height]` for a rotation.
#[wasm_bindgen]
pub fn compute_rotated_bounds(width: u32, height: u32, degrees: f64) -> Vec<u32> {
    let (w, h) = transform::compute_rotated_bounds(width, height, degrees);
    vec![w, h]
}

#[wasm_bindgen]
pub fn crop(
    image: &JsBitmap,
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
) -> Result<JsBitmap, JsValue> {
    transform::crop(image.bitmap(), Region::new(left, top, right, bottom))
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}

/// Circular avatar of diameter `size` with a transparent outside.
#[wasm_bindgen]
pub fn create_circle_image(image: &JsBitmap, size: u32) -> Result<JsBitmap, JsValue> {
    transform::create_circle_image(image.bitmap(), size)
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}

/// Apply `x' = sx·x + kx·y + tx`, `y' = ky·x + sy·y + ty`.
///
/// The output is the bounding box of the mapped bitmap. Filter values:
/// 0 = Nearest, 1 = Bilinear, 2 = Lanczos3.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn apply_matrix(
    image: &JsBitmap,
    sx: f64,
    kx: f64,
    tx: f64,
    ky: f64,
    sy: f64,
    ty: f64,
    filter: u8,
) -> Result<JsBitmap, JsValue> {
    let matrix = Matrix {
        sx,
        kx,
        tx,
        ky,
        sy,
        ty,
    };
    transform::apply_matrix(image.bitmap(), &matrix, filter_from_u8(filter))
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> JsBitmap {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 10) as u8, (y * 10) as u8, 0, 255]);
            }
        }
        JsBitmap::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_scale_to_fit_covers_target() {
        let scaled = scale_to_fit(&gradient(20, 10), 10, 10).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (20, 10));
    }

    #[test]
    fn test_flip_horizontal() {
        let flipped = flip(&gradient(3, 1), -1, 1).unwrap();
        assert_eq!(&flipped.pixels()[..4], &[20, 0, 0, 255]);
    }

    #[test]
    fn test_rotate_quarter_turn_swaps_dimensions() {
        let rotated = rotate(&gradient(8, 4), 90.0).unwrap();
        assert_eq!((rotated.width(), rotated.height()), (4, 8));
    }

    #[test]
    fn test_compute_rotated_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 0.0), vec![100, 50]);
        assert_eq!(compute_rotated_bounds(100, 50, 90.0), vec![50, 100]);
    }

    #[test]
    fn test_crop() {
        let cropped = crop(&gradient(10, 10), 2, 3, 6, 8).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (4, 5));
        assert_eq!(&cropped.pixels()[..4], &[20, 30, 0, 255]);
    }

    #[test]
    fn test_create_circle_image() {
        let avatar = create_circle_image(&gradient(10, 10), 16).unwrap();
        assert_eq!((avatar.width(), avatar.height()), (16, 16));
        assert_eq!(avatar.pixels()[3], 0);
    }

    #[test]
    fn test_apply_matrix_scale() {
        let scaled = apply_matrix(&gradient(4, 4), 2.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (8, 8));
    }
}
