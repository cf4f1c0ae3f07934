//! String validation and binary/text codecs.

mod codec;
mod validate;

use thiserror::Error;

pub use codec::{
    bytes_to_hex, bytes_to_int, format_decimals, hex_to_bytes, int_to_bytes, unescape_unicode,
};
pub use validate::{contains_chinese, is_email, is_http_url, is_id_number, is_ip, is_mobile};

/// Error types for text codecs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextError {
    /// Hex input must have an even number of digits.
    #[error("Hex string has odd length {0}")]
    OddLength(usize),

    /// A character outside `[0-9a-fA-F]`.
    #[error("Invalid hex digit {ch:?} at index {index}")]
    InvalidHexDigit { ch: char, index: usize },

    /// Not enough bytes for the requested value.
    #[error("Need at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
}
