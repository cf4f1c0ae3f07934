//! Rectangular region decoding.
//!
//! Produces an `Rgb565` bitmap covering only the requested rectangle of an
//! encoded image. The region is clipped to the image bounds first; a region
//! with no overlap is an error.
//!
//! PNG rows are streamed and only those inside the region are kept, so the
//! full image is never materialised. JPEG samples are held at their native
//! channel count while the region is copied out.

use std::io::{BufReader, Read, Seek};

use image::{ImageFormat, ImageReader, RgbaImage};

use super::stream::{jpeg_region, png_region, sniff_format, JpegSource, PngRows};
use super::DecodeError;
use crate::bitmap::{Bitmap, PixelFormat, Region};

/// Decode `region` of the image read from `reader` as `Rgb565`.
///
/// The reader is borrowed; the caller keeps ownership and closes it. Its
/// position afterwards is unspecified.
///
/// # Errors
///
/// - [`DecodeError::InvalidFormat`] if the stream is not a recognized image
/// - [`DecodeError::InvalidRegion`] if the region does not intersect the image
pub fn decode_region<R: Read + Seek>(reader: &mut R, region: Region) -> Result<Bitmap, DecodeError> {
    let start = reader.stream_position()?;
    let mut reader = BufReader::new(reader);

    let cropped = match sniff_format(&mut reader)? {
        ImageFormat::Png => match PngRows::open(&mut reader)? {
            Some(rows) => {
                let (width, height) = rows.dimensions();
                Some(png_region(rows, clip(region, width, height)?)?)
            }
            None => None,
        },
        ImageFormat::Jpeg => match JpegSource::open(&mut reader)? {
            Some(jpeg) => {
                let (width, height) = jpeg.dimensions();
                Some(jpeg_region(jpeg, clip(region, width, height)?)?)
            }
            None => None,
        },
        _ => None,
    };

    let cropped = match cropped {
        Some(img) => img,
        None => {
            reader.seek(std::io::SeekFrom::Start(start))?;
            crop_whole(reader, region)?
        }
    };
    Ok(Bitmap::from_rgba_image_as(cropped, PixelFormat::Rgb565))
}

/// Clip `region` to the image, warning when it had to shrink.
fn clip(region: Region, width: u32, height: u32) -> Result<Region, DecodeError> {
    let clipped = region.clip_to(width, height).ok_or(DecodeError::InvalidRegion {
        left: region.left,
        top: region.top,
        right: region.right,
        bottom: region.bottom,
        width,
        height,
    })?;
    if clipped != region {
        log::warn!(
            "region {:?} clipped to {:?} for {}x{} image",
            region,
            clipped,
            width,
            height
        );
    }
    Ok(clipped)
}

/// Decode the whole image and crop it; for containers without a row decoder.
fn crop_whole<R: Read + Seek>(reader: BufReader<R>, region: Region) -> Result<RgbaImage, DecodeError> {
    let image_reader = ImageReader::new(reader).with_guessed_format()?;
    if image_reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    let img = image_reader.decode()?;
    let clipped = clip(region, img.width(), img.height())?;
    Ok(img
        .crop_imm(
            clipped.left as u32,
            clipped.top as u32,
            clipped.width(),
            clipped.height(),
        )
        .into_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn quadrant_png() -> Vec<u8> {
        // 8x8: left half red, right half blue
        let img = RgbaImage::from_fn(8, 8, |x, _| {
            if x < 4 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        });
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_full_region_has_full_dimensions() {
        let mut cursor = Cursor::new(quadrant_png());
        let bmp = decode_region(&mut cursor, Region::full(8, 8)).unwrap();

        assert_eq!(bmp.dimensions(), (8, 8));
        assert_eq!(bmp.format, PixelFormat::Rgb565);
        assert_eq!(bmp.pixels.len(), 8 * 8 * 2);
    }

    #[test]
    fn test_sub_region_content() {
        let mut cursor = Cursor::new(quadrant_png());
        let bmp = decode_region(&mut cursor, Region::new(4, 2, 8, 6)).unwrap();

        assert_eq!(bmp.dimensions(), (4, 4));
        assert_eq!(bmp.pixel_rgba(0, 0), [0, 0, 255, 255]);
        assert_eq!(bmp.pixel_rgba(3, 3), [0, 0, 255, 255]);
    }

    #[test]
    fn test_region_is_clipped() {
        let mut cursor = Cursor::new(quadrant_png());
        let bmp = decode_region(&mut cursor, Region::new(-4, 6, 2, 100)).unwrap();

        assert_eq!(bmp.dimensions(), (2, 2));
        assert_eq!(bmp.pixel_rgba(1, 1), [255, 0, 0, 255]);
    }

    #[test]
    fn test_region_outside_image() {
        let mut cursor = Cursor::new(quadrant_png());
        let result = decode_region(&mut cursor, Region::new(10, 10, 20, 20));
        assert!(matches!(
            result,
            Err(DecodeError::InvalidRegion {
                width: 8,
                height: 8,
                ..
            })
        ));
    }

    #[test]
    fn test_inverted_region() {
        let mut cursor = Cursor::new(quadrant_png());
        let result = decode_region(&mut cursor, Region::new(6, 6, 2, 2));
        assert!(matches!(result, Err(DecodeError::InvalidRegion { .. })));
    }

    #[test]
    fn test_region_of_garbage_stream() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3, 4, 5]);
        let result = decode_region(&mut cursor, Region::full(1, 1));
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_region_of_jpeg() {
        let mut pixels = Vec::with_capacity(32 * 32 * 3);
        for _y in 0..32 {
            for x in 0..32 {
                let color: [u8; 3] = if x < 16 { [255, 255, 255] } else { [0, 0, 0] };
                pixels.extend_from_slice(&color);
            }
        }
        let jpeg = crate::encode::encode_jpeg(&pixels, 32, 32, 95).unwrap();

        let mut cursor = Cursor::new(jpeg);
        let bmp = decode_region(&mut cursor, Region::new(0, 8, 8, 24)).unwrap();
        assert_eq!(bmp.dimensions(), (8, 16));
        assert!(bmp.pixel_rgba(2, 8)[0] > 240);
    }

    #[test]
    fn test_caller_keeps_stream() {
        let mut cursor = Cursor::new(quadrant_png());
        decode_region(&mut cursor, Region::new(0, 0, 1, 1)).unwrap();
        // The cursor is still usable after decoding.
        cursor.set_position(0);
        let again = decode_region(&mut cursor, Region::new(0, 0, 1, 1)).unwrap();
        assert_eq!(again.dimensions(), (1, 1));
    }
}
