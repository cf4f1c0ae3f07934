//! SHA-512 hex digests.

use std::fmt::Write;

use sha2::{Digest, Sha512};

use super::CryptoError;

/// SHA-512 of `data` as 128 lowercase hex characters.
pub fn sha512_hex(data: &[u8]) -> String {
    let mut hasher = Sha512::new();
    hasher.update(data);
    let digest = hasher.finalize();

    digest.iter().fold(String::with_capacity(128), |mut out, b| {
        let _ = write!(out, "{:02x}", b);
        out
    })
}

/// SHA-512 of the UTF-8 bytes of `text`.
///
/// An empty string is rejected with [`CryptoError::EmptyInput`].
pub fn sha512_hex_str(text: &str) -> Result<String, CryptoError> {
    if text.is_empty() {
        return Err(CryptoError::EmptyInput);
    }
    Ok(sha512_hex(text.as_bytes()))
}
