//! Bitmap decoding from bytes and files.
//!
//! Every entry point accepts [`DecodeOptions`]. The scaled variants implement
//! the two-pass protocol: a bounds-only pass reads the stored dimensions from
//! the header, [`calculate_in_sample_size`] picks a divisor for the display
//! size, and a second pass decodes the pixels at that divisor.
//!
//! PNG and JPEG are sampled while decoding, so peak memory follows the output
//! size rather than the stored size. Other containers are decoded whole and
//! then sampled.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek, SeekFrom};
use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader, Limits, RgbaImage};

use super::orientation::{apply_orientation, read_orientation};
use super::sample::{calculate_in_sample_size, subsample};
use super::stream::{jpeg_sampled, png_sampled, sniff_format};
use super::{DecodeError, DecodeOptions, ImageBounds, Orientation};
use crate::bitmap::Bitmap;

/// Read only the header of an encoded image.
///
/// No pixel buffer is allocated.
pub fn decode_bounds(bytes: &[u8]) -> Result<ImageBounds, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    bounds_from_reader(Cursor::new(bytes))
}

/// Read only the header of an image file.
pub fn decode_bounds_file(path: impl AsRef<Path>) -> Result<ImageBounds, DecodeError> {
    bounds_from_reader(BufReader::new(File::open(path)?))
}

/// Decode encoded bytes into a bitmap.
///
/// With `options.bounds_only` set only the header is read: the returned
/// bitmap carries the stored width and height (ignoring `sample_size`) and an
/// empty pixel buffer.
///
/// # Errors
///
/// - [`DecodeError::EmptyInput`] for an empty slice
/// - [`DecodeError::InvalidFormat`] if the container is not recognized
/// - [`DecodeError::CorruptedFile`] if the data is truncated or malformed
/// - [`DecodeError::OutOfMemory`] if `options.max_alloc` is exceeded
pub fn decode_bytes(bytes: &[u8], options: &DecodeOptions) -> Result<Bitmap, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    decode_from_reader(Cursor::new(bytes), options)
}

/// Decode an image file into a bitmap.
pub fn decode_file(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<Bitmap, DecodeError> {
    decode_from_reader(BufReader::new(File::open(path)?), options)
}

/// Decode bytes at the sample size that suits a `show_width × show_height` view.
///
/// # Example
///
/// ```ignore
/// let bytes = std::fs::read("photo.jpg")?;
/// let bitmap = decode_scaled_bytes(&bytes, 400, 300)?;
/// ```
pub fn decode_scaled_bytes(
    bytes: &[u8],
    show_width: i32,
    show_height: i32,
) -> Result<Bitmap, DecodeError> {
    let bounds = decode_bounds(bytes)?;
    let options = scaled_options(&bounds, show_width, show_height);
    decode_bytes(bytes, &options)
}

/// Decode a file at the sample size that suits a `show_width × show_height` view.
pub fn decode_scaled_file(
    path: impl AsRef<Path>,
    show_width: i32,
    show_height: i32,
) -> Result<Bitmap, DecodeError> {
    let path = path.as_ref();
    let bounds = decode_bounds_file(path)?;
    let options = scaled_options(&bounds, show_width, show_height);
    decode_file(path, &options)
}

/// Decode bytes with default options. An empty slice is an error.
pub fn bitmap_from_bytes(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    decode_bytes(bytes, &DecodeOptions::default())
}

fn scaled_options(bounds: &ImageBounds, show_width: i32, show_height: i32) -> DecodeOptions {
    let sample_size = calculate_in_sample_size(bounds.width, bounds.height, show_width, show_height);
    log::debug!(
        "two-pass decode: {}x{} {} for {}x{} view, sample size {}",
        bounds.width,
        bounds.height,
        bounds.format_name,
        show_width,
        show_height,
        sample_size
    );
    DecodeOptions::with_sample_size(sample_size)
}

fn bounds_from_reader<R: BufRead + Seek>(mut reader: R) -> Result<ImageBounds, DecodeError> {
    let orientation = read_orientation(&mut reader);
    reader.seek(SeekFrom::Start(0))?;

    let image_reader = ImageReader::new(reader).with_guessed_format()?;
    let format = image_reader.format().ok_or(DecodeError::InvalidFormat)?;
    let (width, height) = image_reader.into_dimensions()?;

    Ok(ImageBounds {
        width,
        height,
        format_name: format!("{:?}", format).to_lowercase(),
        orientation,
    })
}

fn decode_from_reader<R: BufRead + Seek>(
    mut reader: R,
    options: &DecodeOptions,
) -> Result<Bitmap, DecodeError> {
    if options.bounds_only {
        let bounds = bounds_from_reader(reader)?;
        return Ok(Bitmap {
            width: bounds.width,
            height: bounds.height,
            format: options.preferred_format,
            pixels: Vec::new(),
        });
    }

    let start = reader.stream_position()?;
    let orientation = if options.apply_orientation {
        let orientation = read_orientation(&mut reader);
        reader.seek(SeekFrom::Start(start))?;
        orientation
    } else {
        Orientation::Normal
    };

    let sample_size = options.effective_sample_size();
    let streamed = match sniff_format(&mut reader)? {
        ImageFormat::Png => png_sampled(&mut reader, sample_size, options.max_alloc)?,
        ImageFormat::Jpeg => jpeg_sampled(&mut reader, sample_size, options.max_alloc)?,
        _ => None,
    };
    let rgba = match streamed {
        Some(rgba) => rgba,
        None => {
            reader.seek(SeekFrom::Start(start))?;
            decode_whole(reader, sample_size, options.max_alloc)?
        }
    };
    let rgba = match orientation {
        Orientation::Normal => rgba,
        other => apply_orientation(DynamicImage::ImageRgba8(rgba), other).into_rgba8(),
    };

    log::debug!(
        "decoded {}x{} at sample size {} as {:?}",
        rgba.width(),
        rgba.height(),
        sample_size,
        options.preferred_format
    );

    Ok(Bitmap::from_rgba_image_as(rgba, options.preferred_format))
}

/// Whole-image decode for containers the row decoders do not cover.
fn decode_whole<R: BufRead + Seek>(
    reader: R,
    sample_size: u32,
    max_alloc: Option<u64>,
) -> Result<RgbaImage, DecodeError> {
    let mut image_reader = ImageReader::new(reader).with_guessed_format()?;
    if image_reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    if let Some(max_alloc) = max_alloc {
        let mut limits = Limits::default();
        limits.max_alloc = Some(max_alloc);
        image_reader.limits(limits);
    }
    log::debug!("no row decoder for {:?}, decoding whole image", image_reader.format());
    Ok(subsample(image_reader.decode()?.into_rgba8(), sample_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::PixelFormat;
    use crate::encode::encode_jpeg;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        });
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_bounds() {
        let bounds = decode_bounds(&png_bytes(64, 48)).unwrap();
        assert_eq!(bounds.width, 64);
        assert_eq!(bounds.height, 48);
        assert_eq!(bounds.format_name, "png");
        assert_eq!(bounds.orientation, Orientation::Normal);
    }

    #[test]
    fn test_decode_bytes_bounds_only() {
        let options = DecodeOptions {
            sample_size: 4,
            ..DecodeOptions::bounds()
        };
        let bmp = decode_bytes(&png_bytes(64, 48), &options).unwrap();
        assert_eq!(bmp.dimensions(), (64, 48));
        assert!(bmp.pixels.is_empty());
        assert!(bmp.is_empty());
    }

    #[test]
    fn test_decode_bytes_full_size() {
        let bmp = decode_bytes(&png_bytes(16, 8), &DecodeOptions::default()).unwrap();
        assert_eq!(bmp.dimensions(), (16, 8));
        assert_eq!(bmp.format, PixelFormat::Argb8888);
        assert_eq!(bmp.pixel_rgba(3, 2), [3, 2, 128, 255]);
    }

    #[test]
    fn test_decode_bytes_with_sample_size() {
        let bmp = decode_bytes(&png_bytes(64, 48), &DecodeOptions::with_sample_size(4)).unwrap();
        assert_eq!(bmp.dimensions(), (16, 12));
    }

    #[test]
    fn test_decode_bytes_rounds_sample_size_down() {
        let bmp = decode_bytes(&png_bytes(64, 48), &DecodeOptions::with_sample_size(3)).unwrap();
        assert_eq!(bmp.dimensions(), (32, 24));
    }

    #[test]
    fn test_decode_bytes_rgb565() {
        let options = DecodeOptions {
            preferred_format: PixelFormat::Rgb565,
            ..DecodeOptions::default()
        };
        let bmp = decode_bytes(&png_bytes(10, 10), &options).unwrap();
        assert_eq!(bmp.format, PixelFormat::Rgb565);
        assert_eq!(bmp.pixels.len(), 10 * 10 * 2);
    }

    #[test]
    fn test_decode_scaled_bytes() {
        // 256x192 for a 30x20 view: halves 128x96 -> 64x48 -> 32x24 still exceed,
        // 16x12 does not, so the divisor is 8.
        let bmp = decode_scaled_bytes(&png_bytes(256, 192), 30, 20).unwrap();
        assert_eq!(bmp.dimensions(), (32, 24));
        assert!(bmp.width >= 30 && bmp.height >= 20);
    }

    #[test]
    fn test_decode_scaled_bytes_no_downsampling_when_small() {
        let bmp = decode_scaled_bytes(&png_bytes(20, 20), 100, 100).unwrap();
        assert_eq!(bmp.dimensions(), (20, 20));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(bitmap_from_bytes(&[]), Err(DecodeError::EmptyInput)));
        assert!(matches!(decode_bounds(&[]), Err(DecodeError::EmptyInput)));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = bitmap_from_bytes(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(32, 32);
        let result = bitmap_from_bytes(&bytes[..bytes.len() / 2]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_alloc_limit() {
        let options = DecodeOptions {
            max_alloc: Some(16),
            ..DecodeOptions::default()
        };
        let result = decode_bytes(&png_bytes(64, 64), &options);
        assert!(matches!(result, Err(DecodeError::OutOfMemory)));
    }

    #[test]
    fn test_decode_missing_file() {
        let result = decode_file("/nonexistent/utilkit/missing.png", &DecodeOptions::default());
        assert!(matches!(result, Err(DecodeError::IoError(_))));
    }

    #[test]
    fn test_decode_scaled_file() {
        let path = std::env::temp_dir().join(format!("utilkit-scaled-{}.png", std::process::id()));
        std::fs::write(&path, png_bytes(128, 128)).unwrap();

        let bmp = decode_scaled_file(&path, 16, 16).unwrap();
        let bounds = decode_bounds_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!((bounds.width, bounds.height), (128, 128));
        assert_eq!(bmp.dimensions(), (32, 32));
    }

    #[test]
    fn test_sampled_decode_fits_in_output_budget() {
        // Full RGBA would be 4 MiB; the sampled output is 64 KiB.
        let options = DecodeOptions {
            max_alloc: Some(1_000_000),
            ..DecodeOptions::with_sample_size(8)
        };
        let bmp = decode_bytes(&png_bytes(1024, 1024), &options).unwrap();
        assert_eq!(bmp.dimensions(), (128, 128));
        assert_eq!(bmp.pixel_rgba(1, 2), [12, 20, 128, 255]);
    }

    #[test]
    fn test_full_decode_exceeds_same_budget() {
        let options = DecodeOptions {
            max_alloc: Some(1_000_000),
            ..DecodeOptions::default()
        };
        let result = decode_bytes(&png_bytes(1024, 1024), &options);
        assert!(matches!(result, Err(DecodeError::OutOfMemory)));
    }

    #[test]
    fn test_decode_jpeg_with_sample_size() {
        let jpeg = encode_jpeg(&vec![200u8; 64 * 48 * 3], 64, 48, 90).unwrap();
        let bmp = decode_bytes(&jpeg, &DecodeOptions::with_sample_size(4)).unwrap();
        assert_eq!(bmp.dimensions(), (16, 12));
        let [r, g, b, a] = bmp.pixel_rgba(8, 6);
        assert!(r.abs_diff(200) <= 3 && g.abs_diff(200) <= 3 && b.abs_diff(200) <= 3);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_decode_from_offset_reader() {
        let mut data = vec![0xAAu8; 7];
        data.extend(png_bytes(8, 8));
        let mut cursor = Cursor::new(data);
        cursor.set_position(7);
        let bmp = decode_from_reader(cursor, &DecodeOptions::with_sample_size(2)).unwrap();
        assert_eq!(bmp.dimensions(), (4, 4));
    }

    #[test]
    fn test_bounds_only_pixels_read_as_transparent() {
        let bmp = decode_bytes(&png_bytes(8, 8), &DecodeOptions::bounds()).unwrap();
        assert_eq!(bmp.pixel_rgba(3, 3), [0, 0, 0, 0]);
    }
}
