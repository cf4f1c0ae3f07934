//! Owned raster images.
//!
//! A [`Bitmap`] is the unit every decode, transform and encode operation
//! consumes and produces. Operations borrow their input and always allocate
//! a fresh output, so a transform chain never aliases pixel buffers.
//!
//! # Pixel formats
//!
//! - [`PixelFormat::Argb8888`]: 4 bytes per pixel, stored R, G, B, A with
//!   straight (non-premultiplied) alpha.
//! - [`PixelFormat::Rgb565`]: 2 bytes per pixel, one little-endian `u16`
//!   packed as `rrrrrggg gggbbbbb`. There is no alpha channel; converting a
//!   translucent pixel to this format composites it over black.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Upper bound on a single pixel buffer (256 MiB).
pub const MAX_BITMAP_BYTES: usize = 256 * 1024 * 1024;

/// Pixel storage layout of a [`Bitmap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 8 bits per channel with alpha.
    #[default]
    Argb8888,
    /// 16-bit packed RGB without alpha.
    Rgb565,
}

impl PixelFormat {
    /// Number of bytes used by one pixel.
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Argb8888 => 4,
            PixelFormat::Rgb565 => 2,
        }
    }

    /// Whether pixels in this format carry an alpha channel.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Argb8888)
    }
}

/// An owned 2-D grid of pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Layout of `pixels`.
    pub format: PixelFormat,
    /// Row-major pixel data, `width * height * format.bytes_per_pixel()` bytes.
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a bitmap from raw pixel data.
    pub fn new(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * format.bytes_per_pixel(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Allocate a fully transparent (or black, for `Rgb565`) canvas.
    ///
    /// Returns `None` when the buffer size overflows, exceeds
    /// [`MAX_BITMAP_BYTES`], or the allocator refuses the request.
    pub fn blank(width: u32, height: u32, format: PixelFormat) -> Option<Self> {
        let len = byte_len(width, height, format)?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).ok()?;
        pixels.resize(len, 0);
        Some(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// Wrap an `image::RgbaImage` as an `Argb8888` bitmap without copying.
    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            format: PixelFormat::Argb8888,
            pixels: img.into_raw(),
        }
    }

    /// Build a bitmap of the requested format from RGBA pixels.
    pub fn from_rgba_image_as(img: RgbaImage, format: PixelFormat) -> Self {
        match format {
            PixelFormat::Argb8888 => Self::from_rgba_image(img),
            PixelFormat::Rgb565 => {
                let (width, height) = img.dimensions();
                let mut pixels = Vec::with_capacity(width as usize * height as usize * 2);
                for px in img.pixels() {
                    pixels.extend_from_slice(&pack_rgb565(px.0).to_le_bytes());
                }
                Self {
                    width,
                    height,
                    format,
                    pixels,
                }
            }
        }
    }

    /// Expand to an `image::RgbaImage`.
    ///
    /// Returns `None` if the pixel buffer does not match the dimensions.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        match self.format {
            PixelFormat::Argb8888 => RgbaImage::from_raw(self.width, self.height, self.pixels.clone()),
            PixelFormat::Rgb565 => {
                if self.pixels.len() != self.width as usize * self.height as usize * 2 {
                    return None;
                }
                let mut rgba = Vec::with_capacity(self.pixels.len() * 2);
                for chunk in self.pixels.chunks_exact(2) {
                    rgba.extend_from_slice(&unpack_rgb565(u16::from_le_bytes([chunk[0], chunk[1]])));
                }
                RgbaImage::from_raw(self.width, self.height, rgba)
            }
        }
    }

    /// Convert to another pixel format. Same-format conversion is a move.
    pub fn into_format(self, format: PixelFormat) -> Option<Self> {
        if self.format == format {
            return Some(self);
        }
        let rgba = self.to_rgba_image()?;
        Some(Self::from_rgba_image_as(rgba, format))
    }

    /// Read one pixel as RGBA.
    ///
    /// Out-of-bounds reads, and reads from a bitmap whose buffer is shorter
    /// than its dimensions (such as a bounds-only decode), return transparent
    /// black.
    pub fn pixel_rgba(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let bpp = self.format.bytes_per_pixel();
        let idx = (y as usize * self.width as usize + x as usize) * bpp;
        match (self.format, self.pixels.get(idx..idx + bpp)) {
            (PixelFormat::Argb8888, Some(px)) => [px[0], px[1], px[2], px[3]],
            (PixelFormat::Rgb565, Some(px)) => unpack_rgb565(u16::from_le_bytes([px[0], px[1]])),
            (_, None) => [0, 0, 0, 0],
        }
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// Axis-aligned rectangle in source pixel coordinates.
///
/// `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    /// Left edge (inclusive).
    pub left: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl Region {
    /// Create a region from its edges.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The full extent of a `width × height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, clamp_i32(width), clamp_i32(height))
    }

    /// Width, or 0 for an inverted region.
    pub fn width(&self) -> u32 {
        (self.right as i64 - self.left as i64).max(0) as u32
    }

    /// Height, or 0 for an inverted region.
    pub fn height(&self) -> u32 {
        (self.bottom as i64 - self.top as i64).max(0) as u32
    }

    /// Whether the region covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Intersect with the bounds of a `width × height` image.
    ///
    /// Returns `None` when nothing of the region lies inside the image.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Region> {
        let clipped = Region::new(
            self.left.max(0),
            self.top.max(0),
            self.right.min(clamp_i32(width)),
            self.bottom.min(clamp_i32(height)),
        );
        (!clipped.is_empty()).then_some(clipped)
    }
}

#[inline]
fn clamp_i32(value: u32) -> i32 {
    value.min(i32::MAX as u32) as i32
}

/// Buffer length for a canvas, or `None` if it would exceed [`MAX_BITMAP_BYTES`].
pub(crate) fn byte_len(width: u32, height: u32, format: PixelFormat) -> Option<usize> {
    let len = (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(format.bytes_per_pixel())?;
    (len <= MAX_BITMAP_BYTES).then_some(len)
}

/// Drop alpha by compositing a straight-alpha pixel over black.
#[inline]
pub(crate) fn composite_over_black(rgba: [u8; 4]) -> [u8; 3] {
    let a = rgba[3] as u32;
    [
        ((rgba[0] as u32 * a + 127) / 255) as u8,
        ((rgba[1] as u32 * a + 127) / 255) as u8,
        ((rgba[2] as u32 * a + 127) / 255) as u8,
    ]
}

/// Pack an RGBA pixel into RGB565, compositing over black.
#[inline]
pub(crate) fn pack_rgb565(rgba: [u8; 4]) -> u16 {
    let [r, g, b] = composite_over_black(rgba);
    let (r, g, b) = (r as u16, g as u16, b as u16);
    ((r >> 3) << 11) | ((g >> 2) << 5) | (b >> 3)
}

/// Expand an RGB565 value to opaque RGBA, replicating high bits into the low bits.
#[inline]
pub(crate) fn unpack_rgb565(value: u16) -> [u8; 4] {
    let r5 = ((value >> 11) & 0x1F) as u8;
    let g6 = ((value >> 5) & 0x3F) as u8;
    let b5 = (value & 0x1F) as u8;
    [
        (r5 << 3) | (r5 >> 2),
        (g6 << 2) | (g6 >> 4),
        (b5 << 3) | (b5 >> 2),
        255,
    ]
}
