//! Hashing and symmetric encryption helpers.
//!
//! - [`sha512_hex`]: SHA-512 digest as 128 lowercase hex characters
//! - [`generate_key`], [`encrypt`], [`decrypt`]: Triple-DES (EDE) in ECB mode
//!   with PKCS#5/PKCS#7 padding, byte-compatible with `DESede/ECB/PKCS5Padding`

mod sha512;
mod triple_des;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use sha512::{sha512_hex, sha512_hex_str};
pub use triple_des::{decrypt, encrypt, generate_key, has_odd_parity};

/// Error types for crypto operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// No input was supplied where some is required.
    #[error("Empty input")]
    EmptyInput,

    /// The key is neither 16 nor 24 bytes.
    #[error("Invalid Triple-DES key length: {0} bytes (expected 16 or 24)")]
    InvalidKeyLength(usize),

    /// Ciphertext is not block aligned or its padding is wrong.
    #[error("Invalid ciphertext: wrong length or padding")]
    InvalidCiphertext,
}

/// Strength of a generated Triple-DES key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TripleDesKeySize {
    /// Two independent DES keys; the third equals the first.
    Bits112,
    /// Three independent DES keys.
    #[default]
    Bits168,
}

impl TripleDesKeySize {
    /// Parse a key size in bits. Only 112 and 168 are accepted.
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            112 => Some(Self::Bits112),
            168 => Some(Self::Bits168),
            _ => None,
        }
    }
}
