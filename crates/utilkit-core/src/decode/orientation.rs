//! EXIF orientation lookup and correction.
//!
//! The platform decoder ignores EXIF orientation, so decoding leaves pixels in
//! stored order unless `DecodeOptions::apply_orientation` is set. Bounds-only
//! decodes still report the tag so callers can swap dimensions themselves.

use std::io::{BufRead, Cursor, Seek};

use exif::{In, Reader, Tag};
use image::DynamicImage;

use super::Orientation;

/// Read the EXIF orientation from a seekable container.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined. The reader position is left unspecified.
pub(crate) fn read_orientation<R: BufRead + Seek>(reader: &mut R) -> Orientation {
    match Reader::new().read_from_container(reader) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Extract the EXIF orientation value from encoded image bytes.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    read_orientation(&mut Cursor::new(bytes))
}

/// Apply EXIF orientation transformation to an image.
pub(crate) fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
