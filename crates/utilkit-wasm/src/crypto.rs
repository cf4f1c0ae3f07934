//! Hashing and Triple-DES WASM bindings.
//!
//! Keys and ciphertexts cross the boundary as `Uint8Array`s.

use crate::types::js_error;
use utilkit_core::crypto::{self, TripleDesKeySize};
use wasm_bindgen::prelude::*;

/// SHA-512 of raw bytes as 128 lowercase hex characters.
#[wasm_bindgen]
pub fn sha512_hex(data: &[u8]) -> String {
    crypto::sha512_hex(data)
}

/// SHA-512 of the UTF-8 bytes of `text`. Empty text is an error.
#[wasm_bindgen]
pub fn sha512_hex_str(text: &str) -> Result<String, JsValue> {
    crypto::sha512_hex_str(text).map_err(js_error)
}

/// Generate a 24-byte Triple-DES key for a strength of 112 or 168 bits.
#[wasm_bindgen]
pub fn generate_key(bits: u32) -> Result<Vec<u8>, JsValue> {
    let size = TripleDesKeySize::from_bits(bits)
        .ok_or_else(|| JsValue::from_str(&format!("unsupported key size: {} bits", bits)))?;
    Ok(crypto::generate_key(size))
}

#[wasm_bindgen]
pub fn encrypt(data: &[u8], key: &[u8]) -> Result<Vec<u8>, JsValue> {
    crypto::encrypt(data, key).map_err(js_error)
}

#[wasm_bindgen]
pub fn decrypt(data: &[u8], key: &[u8]) -> Result<Vec<u8>, JsValue> {
    crypto::decrypt(data, key).map_err(js_error)
}
