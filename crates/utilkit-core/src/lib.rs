//! utilkit core - bitmap and general-purpose utility library
//!
//! This crate provides memory-bounded bitmap decoding, geometric transforms,
//! circular avatars and encoding, together with SHA-512 / Triple-DES helpers,
//! regex validators, binary text codecs, a touch hit test and clock helpers.
//!
//! Every function is synchronous and keeps no state between calls; the only
//! shared data are the lazily compiled validator regexes.

pub mod bitmap;
pub mod clock;
pub mod crypto;
pub mod decode;
pub mod encode;
pub mod text;
pub mod transform;
pub mod view;

pub use bitmap::{Bitmap, PixelFormat, Region};
pub use decode::{
    calculate_in_sample_size, decode_bounds, decode_bytes, decode_region, decode_scaled_bytes,
    DecodeError, DecodeOptions, FilterType, ImageBounds,
};
pub use encode::{compress, CompressFormat, EncodeError};
pub use transform::{
    create_circle_image, flip, rotate, scale_to_fit, Matrix, TransformError,
};
pub use view::{is_touch_in_view, ViewBounds};

#[cfg(test)]
mod tests {
    use super::*;

    /// Decode, transform and re-encode through the public surface.
    #[test]
    fn test_avatar_pipeline() {
        let src = Bitmap::new(
            40,
            30,
            PixelFormat::Argb8888,
            [30u8, 60, 90, 255].repeat(40 * 30),
        );
        let png = compress(&src, CompressFormat::Png, 100).unwrap();

        let decoded = decode_scaled_bytes(&png, 10, 10).unwrap();
        assert_eq!(decoded.dimensions(), (20, 15));

        let mirrored = flip(&decoded, -1, 1).unwrap();
        let avatar = create_circle_image(&mirrored, 12).unwrap();
        assert_eq!(avatar.dimensions(), (12, 12));
        assert_eq!(avatar.pixel_rgba(6, 6), [30, 60, 90, 255]);
        assert_eq!(avatar.pixel_rgba(0, 0)[3], 0);

        let out = compress(&avatar, CompressFormat::Png, 100).unwrap();
        assert_eq!(decode_bounds(&out).unwrap().width, 12);
    }

    #[test]
    fn test_default_options() {
        let options = DecodeOptions::default();
        assert_eq!(options.sample_size, 1);
        assert_eq!(options.preferred_format, PixelFormat::Argb8888);
        assert_eq!(FilterType::default(), FilterType::Bilinear);
        assert_eq!(CompressFormat::default(), CompressFormat::Png);
    }
}
