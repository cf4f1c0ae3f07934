//! Triple-DES in ECB mode with PKCS#5 padding.
//!
//! 24-byte keys run three-key EDE (K1, K2, K3); 16-byte keys run two-key EDE
//! with K3 = K1. Generated keys are always 24 bytes, as the JCE `DESede` key
//! generator produces them.

use des::{TdesEde2, TdesEde3};
use ecb::cipher::block_padding::Pkcs7;
use ecb::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};
use rand::Rng;

use super::{CryptoError, TripleDesKeySize};

const DES_KEY_LEN: usize = 8;

/// Generate a random Triple-DES key with DES odd parity in every byte.
///
/// Both sizes return 24 bytes; for [`TripleDesKeySize::Bits112`] the last
/// eight bytes repeat the first eight.
pub fn generate_key(size: TripleDesKeySize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut key = vec![0u8; 3 * DES_KEY_LEN];
    match size {
        TripleDesKeySize::Bits168 => rng.fill(&mut key[..]),
        TripleDesKeySize::Bits112 => {
            rng.fill(&mut key[..2 * DES_KEY_LEN]);
            key.copy_within(..DES_KEY_LEN, 2 * DES_KEY_LEN);
        }
    }
    for byte in key.iter_mut() {
        *byte = with_odd_parity(*byte);
    }
    key
}

/// Whether every byte of `key` has an odd number of set bits.
pub fn has_odd_parity(key: &[u8]) -> bool {
    key.iter().all(|b| b.count_ones() % 2 == 1)
}

/// Set the low bit so the byte has odd parity.
#[inline]
fn with_odd_parity(byte: u8) -> u8 {
    let high = byte & 0xFE;
    if high.count_ones() % 2 == 0 {
        high | 1
    } else {
        high
    }
}

/// Encrypt `data` with PKCS#5 padding. Output length is the next multiple of 8.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyLength`] unless the key is 16 or 24 bytes.
pub fn encrypt(data: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let out = match key.len() {
        24 => ecb::Encryptor::<TdesEde3>::new_from_slice(key)
            .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?
            .encrypt_padded_vec_mut::<Pkcs7>(data),
        16 => ecb::Encryptor::<TdesEde2>::new_from_slice(key)
            .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?
            .encrypt_padded_vec_mut::<Pkcs7>(data),
        n => return Err(CryptoError::InvalidKeyLength(n)),
    };
    Ok(out)
}

/// Decrypt `data` and strip PKCS#5 padding.
///
/// # Errors
///
/// - [`CryptoError::InvalidKeyLength`] unless the key is 16 or 24 bytes
/// - [`CryptoError::InvalidCiphertext`] if the input is empty, not a multiple
///   of 8 bytes, or its padding does not verify (usually a wrong key)
pub fn decrypt(data: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if !matches!(key.len(), 16 | 24) {
        return Err(CryptoError::InvalidKeyLength(key.len()));
    }
    if data.is_empty() || data.len() % DES_KEY_LEN != 0 {
        return Err(CryptoError::InvalidCiphertext);
    }

    let result = if key.len() == 24 {
        ecb::Decryptor::<TdesEde3>::new_from_slice(key)
            .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?
            .decrypt_padded_vec_mut::<Pkcs7>(data)
    } else {
        ecb::Decryptor::<TdesEde2>::new_from_slice(key)
            .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?
            .decrypt_padded_vec_mut::<Pkcs7>(data)
    };
    result.map_err(|_| CryptoError::InvalidCiphertext)
}
