//! Base64 transport of PNG-encoded bitmaps.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::{compress, CompressFormat, EncodeError};
use crate::bitmap::Bitmap;
use crate::decode::{bitmap_from_bytes, DecodeError};

/// Encode a bitmap as PNG and wrap it in standard Base64 without line breaks.
pub fn bitmap_to_base64(bitmap: &Bitmap) -> Result<String, EncodeError> {
    let png = compress(bitmap, CompressFormat::Png, 100)?;
    Ok(STANDARD.encode(png))
}

/// Decode standard Base64 text into a bitmap.
///
/// ASCII whitespace (including line breaks from wrapped encoders) is ignored.
///
/// # Errors
///
/// - [`DecodeError::EmptyInput`] if nothing but whitespace is supplied
/// - [`DecodeError::CorruptedFile`] if the text is not valid Base64
/// - any error from decoding the embedded image
pub fn base64_to_bitmap(text: &str) -> Result<Bitmap, DecodeError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| DecodeError::CorruptedFile(format!("invalid base64: {}", e)))?;
    bitmap_from_bytes(&bytes)
}
