//! 2-D affine matrices and matrix-driven resampling.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - Pixel `(x, y)` covers the unit square `[x, x+1) × [y, y+1)`
//! - Positive rotation angles turn clockwise on screen
//!
//! # Algorithm
//!
//! [`apply_matrix`] maps the four corners of the source through the matrix,
//! allocates the rounded bounding box and translates its top-left corner to
//! the origin. Each destination pixel centre is then mapped back through the
//! inverse matrix and sampled from the source. Destination pixels whose
//! centre falls outside the source stay transparent.

use crate::bitmap::{Bitmap, PixelFormat};
use crate::decode::{resize, FilterType};

use super::TransformError;

/// Affine transform `x' = sx·x + kx·y + tx`, `y' = ky·x + sy·y + ty`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub sx: f64,
    pub kx: f64,
    pub tx: f64,
    pub ky: f64,
    pub sy: f64,
    pub ty: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    /// The identity transform.
    pub const fn identity() -> Self {
        Self {
            sx: 1.0,
            kx: 0.0,
            tx: 0.0,
            ky: 0.0,
            sy: 1.0,
            ty: 0.0,
        }
    }

    /// A pure scale. Negative factors mirror the axis.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            sx,
            sy,
            ..Self::identity()
        }
    }

    /// A rotation about the origin, clockwise for positive degrees.
    pub fn rotate(degrees: f64) -> Self {
        let (sin, cos) = sin_cos_degrees(degrees);
        Self {
            sx: cos,
            kx: -sin,
            tx: 0.0,
            ky: sin,
            sy: cos,
            ty: 0.0,
        }
    }

    /// A pure translation.
    pub fn translate(dx: f64, dy: f64) -> Self {
        Self {
            tx: dx,
            ty: dy,
            ..Self::identity()
        }
    }

    /// `other × self`: apply `self` first, then `other`.
    pub fn post_concat(&self, other: &Matrix) -> Self {
        Self {
            sx: other.sx * self.sx + other.kx * self.ky,
            kx: other.sx * self.kx + other.kx * self.sy,
            tx: other.sx * self.tx + other.kx * self.ty + other.tx,
            ky: other.ky * self.sx + other.sy * self.ky,
            sy: other.ky * self.kx + other.sy * self.sy,
            ty: other.ky * self.tx + other.sy * self.ty + other.ty,
        }
    }

    /// Append a scale.
    pub fn post_scale(&self, sx: f64, sy: f64) -> Self {
        self.post_concat(&Self::scale(sx, sy))
    }

    /// Append a rotation.
    pub fn post_rotate(&self, degrees: f64) -> Self {
        self.post_concat(&Self::rotate(degrees))
    }

    /// Append a translation.
    pub fn post_translate(&self, dx: f64, dy: f64) -> Self {
        self.post_concat(&Self::translate(dx, dy))
    }

    /// Transform a point.
    #[inline]
    pub fn map_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.sx * x + self.kx * y + self.tx,
            self.ky * x + self.sy * y + self.ty,
        )
    }

    /// Bounding box `(left, top, right, bottom)` of the mapped `width × height` rectangle.
    pub fn map_rect(&self, width: f64, height: f64) -> (f64, f64, f64, f64) {
        let corners = [
            self.map_point(0.0, 0.0),
            self.map_point(width, 0.0),
            self.map_point(0.0, height),
            self.map_point(width, height),
        ];
        corners.iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(l, t, r, b), &(x, y)| (l.min(x), t.min(y), r.max(x), b.max(y)),
        )
    }

    /// The inverse transform, or `None` for a singular matrix.
    pub fn invert(&self) -> Option<Self> {
        let det = self.sx * self.sy - self.kx * self.ky;
        if !det.is_finite() || det.abs() < 1e-12 {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self {
            sx: self.sy * inv,
            kx: -self.kx * inv,
            tx: (self.kx * self.ty - self.sy * self.tx) * inv,
            ky: -self.ky * inv,
            sy: self.sx * inv,
            ty: (self.ky * self.tx - self.sx * self.ty) * inv,
        })
    }

    /// Whether axis-aligned rectangles map to axis-aligned rectangles.
    pub fn rect_stays_rect(&self) -> bool {
        (self.kx == 0.0 && self.ky == 0.0) || (self.sx == 0.0 && self.sy == 0.0)
    }

    /// Whether the matrix only scales by positive factors and translates.
    pub fn is_positive_scale_translate(&self) -> bool {
        self.kx == 0.0 && self.ky == 0.0 && self.sx > 0.0 && self.sy > 0.0
    }
}

/// Sine and cosine of an angle in degrees, exact on multiples of 90°.
fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    let d = degrees.rem_euclid(360.0);
    if d == 0.0 {
        (0.0, 1.0)
    } else if d == 90.0 {
        (1.0, 0.0)
    } else if d == 180.0 {
        (0.0, -1.0)
    } else if d == 270.0 {
        (-1.0, 0.0)
    } else {
        d.to_radians().sin_cos()
    }
}

/// Output dimensions of [`apply_matrix`].
pub fn mapped_dimensions(width: u32, height: u32, matrix: &Matrix) -> (u32, u32) {
    let (l, t, r, b) = matrix.map_rect(width as f64, height as f64);
    (round_dim(r - l), round_dim(b - t))
}

#[inline]
fn round_dim(extent: f64) -> u32 {
    if extent.is_finite() && extent > 0.0 {
        extent.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Resample a bitmap through an affine matrix.
///
/// The output covers the full mapped extent of the source. Matrices that keep
/// rectangles axis-aligned preserve the source pixel format; any other matrix
/// produces `Argb8888` so the uncovered corners can be transparent.
///
/// # Errors
///
/// - [`TransformError::InvalidArgument`] for an empty source, a singular
///   matrix, or a mapped extent that rounds to zero
/// - [`TransformError::AllocationFailed`] if the output canvas is too large
pub fn apply_matrix(
    bitmap: &Bitmap,
    matrix: &Matrix,
    filter: FilterType,
) -> Result<Bitmap, TransformError> {
    if bitmap.is_empty() {
        return Err(TransformError::InvalidArgument("empty bitmap".to_string()));
    }
    let inverse = matrix
        .invert()
        .ok_or_else(|| TransformError::InvalidArgument("matrix is not invertible".to_string()))?;

    let (left, top, _, _) = matrix.map_rect(bitmap.width as f64, bitmap.height as f64);
    let (dst_w, dst_h) = mapped_dimensions(bitmap.width, bitmap.height, matrix);
    if dst_w == 0 || dst_h == 0 {
        return Err(TransformError::InvalidArgument(format!(
            "transform maps {}x{} to an empty image",
            bitmap.width, bitmap.height
        )));
    }

    // Fast path: plain resize through the image crate's filters
    if matrix.is_positive_scale_translate() {
        if crate::bitmap::byte_len(dst_w, dst_h, bitmap.format).is_none() {
            return Err(TransformError::AllocationFailed {
                width: dst_w,
                height: dst_h,
            });
        }
        return resize(bitmap, dst_w, dst_h, filter).map_err(|e| TransformError::InvalidArgument(e.to_string()));
    }

    let src = bitmap
        .to_rgba_image()
        .ok_or_else(|| TransformError::InvalidArgument("pixel buffer size mismatch".to_string()))?;
    let mut dst = Bitmap::blank(dst_w, dst_h, PixelFormat::Argb8888).ok_or(
        TransformError::AllocationFailed {
            width: dst_w,
            height: dst_h,
        },
    )?;

    let (src_w, src_h) = (bitmap.width as f64, bitmap.height as f64);
    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let (u, v) = inverse.map_point(dst_x as f64 + 0.5 + left, dst_y as f64 + 0.5 + top);
            if u < 0.0 || u >= src_w || v < 0.0 || v >= src_h {
                continue;
            }

            // Shift from pixel-area coordinates to pixel-centre coordinates
            let (px, py) = (u - 0.5, v - 0.5);
            let pixel = match filter {
                FilterType::Nearest => *src.get_pixel(u as u32, v as u32),
                FilterType::Bilinear => sample_bilinear(&src, px, py),
                FilterType::Lanczos3 => sample_lanczos3(&src, px, py),
            };

            let idx = (dst_y as usize * dst_w as usize + dst_x as usize) * 4;
            dst.pixels[idx..idx + 4].copy_from_slice(&pixel.0);
        }
    }

    if matrix.rect_stays_rect() && bitmap.format != PixelFormat::Argb8888 {
        return dst
            .into_format(bitmap.format)
            .ok_or_else(|| TransformError::InvalidArgument("pixel buffer size mismatch".to_string()));
    }
    Ok(dst)
}

/// Fetch a pixel with edge clamping as premultiplied `[r, g, b, a]`.
#[inline]
fn premultiplied(img: &image::RgbaImage, x: i64, y: i64) -> [f64; 4] {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let p = img.get_pixel(x.clamp(0, w - 1) as u32, y.clamp(0, h - 1) as u32).0;
    let a = p[3] as f64;
    [p[0] as f64 * a, p[1] as f64 * a, p[2] as f64 * a, a]
}

#[inline]
fn unpremultiply(sum: [f64; 4]) -> image::Rgba<u8> {
    let a = sum[3].clamp(0.0, 255.0);
    if a <= 0.0 {
        return image::Rgba([0, 0, 0, 0]);
    }
    let channel = |c: f64| (c / sum[3]).clamp(0.0, 255.0).round() as u8;
    image::Rgba([channel(sum[0]), channel(sum[1]), channel(sum[2]), a.round() as u8])
}

/// Sample a pixel using bilinear interpolation.
///
/// `(x, y)` are pixel-centre coordinates; neighbours beyond the edge are
/// clamped. Interpolation happens on premultiplied values so transparent
/// neighbours do not bleed their colour.
fn sample_bilinear(img: &image::RgbaImage, x: f64, y: f64) -> image::Rgba<u8> {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    // Exact hit: copy the pixel so fully transparent colours survive
    if fx == 0.0 && fy == 0.0 {
        let (w, h) = (img.width() as i64, img.height() as i64);
        return *img.get_pixel(x0.clamp(0, w - 1) as u32, y0.clamp(0, h - 1) as u32);
    }

    let p00 = premultiplied(img, x0, y0);
    let p10 = premultiplied(img, x0 + 1, y0);
    let p01 = premultiplied(img, x0, y0 + 1);
    let p11 = premultiplied(img, x0 + 1, y0 + 1);

    let mut sum = [0.0f64; 4];
    for i in 0..4 {
        sum[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }
    unpremultiply(sum)
}

/// Sample a pixel using Lanczos3 interpolation over a 6x6 neighbourhood.
///
/// Falls back to bilinear within three pixels of the edge.
fn sample_lanczos3(img: &image::RgbaImage, x: f64, y: f64) -> image::Rgba<u8> {
    let (w, h) = (img.width() as i64, img.height() as i64);
    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        return sample_bilinear(img, x, y);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;
    for ky in -2..=3 {
        for kx in -2..=3 {
            let (px, py) = (x0 + kx, y0 + ky);
            let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);
            let pixel = premultiplied(img, px, py);
            for i in 0..4 {
                sum[i] += pixel[i] * weight;
            }
            weight_sum += weight;
        }
    }

    if weight_sum.abs() < f64::EPSILON {
        return sample_bilinear(img, x, y);
    }
    for s in sum.iter_mut() {
        *s /= weight_sum;
    }
    unpremultiply(sum)
}

/// Lanczos kernel `sinc(x) · sinc(x/a)` for `|x| < a`, 0 otherwise.
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
