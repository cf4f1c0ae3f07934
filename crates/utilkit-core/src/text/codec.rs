//! Hex, integer and `\uXXXX` codecs.

use std::str::FromStr;

use byteorder::{ByteOrder, LittleEndian};
use rust_decimal::{Decimal, RoundingStrategy};

use super::TextError;

const MAX_DECIMAL_PLACES: u32 = 28;

/// Parse a hex string into bytes. Digits are case-insensitive.
///
/// An empty string yields an empty vector.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, TextError> {
    let digits: Vec<char> = hex.chars().collect();
    if digits.len() % 2 != 0 {
        return Err(TextError::OddLength(digits.len()));
    }

    let nibble = |index: usize| -> Result<u8, TextError> {
        let ch = digits[index];
        ch.to_digit(16)
            .map(|d| d as u8)
            .ok_or(TextError::InvalidHexDigit { ch, index })
    };

    (0..digits.len() / 2)
        .map(|i| Ok((nibble(2 * i)? << 4) | nibble(2 * i + 1)?))
        .collect()
}

/// Lower-case hex, two digits per byte.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(DIGITS[(b >> 4) as usize] as char);
        out.push(DIGITS[(b & 0x0F) as usize] as char);
    }
    out
}

/// Little-endian bytes of `value`, least significant first.
pub fn int_to_bytes(value: i32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    LittleEndian::write_i32(&mut buf, value);
    buf
}

/// Read a little-endian `i32` from the first four bytes.
///
/// Extra bytes are ignored.
pub fn bytes_to_int(bytes: &[u8]) -> Result<i32, TextError> {
    if bytes.len() < 4 {
        return Err(TextError::TooShort {
            expected: 4,
            actual: bytes.len(),
        });
    }
    Ok(LittleEndian::read_i32(&bytes[..4]))
}

/// Replace `\uXXXX` escapes with the characters they name.
///
/// UTF-16 surrogate pairs written as two consecutive escapes are combined.
/// Escapes that are truncated, contain non-hex digits, or name a lone
/// surrogate are kept verbatim, as is all surrounding text.
pub fn unescape_unicode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find("\\u") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let Some(unit) = escape_unit(rest) else {
            out.push_str("\\u");
            rest = &rest[2..];
            continue;
        };

        if (0xD800..0xDC00).contains(&unit) {
            if let Some(low) = escape_unit(&rest[6..]).filter(|u| (0xDC00..0xE000).contains(u)) {
                let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                if let Some(ch) = char::from_u32(combined) {
                    out.push(ch);
                    rest = &rest[12..];
                    continue;
                }
            }
        }

        match char::from_u32(unit) {
            Some(ch) => out.push(ch),
            None => out.push_str(&rest[..6]),
        }
        rest = &rest[6..];
    }

    out.push_str(rest);
    out
}

/// The code unit of a `\uXXXX` escape at the start of `text`.
fn escape_unit(text: &str) -> Option<u32> {
    let hex = text.strip_prefix("\\u")?.get(..4)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// Format `value` with exactly `places` digits after the decimal point.
///
/// Rounds half away from zero on the shortest decimal form of `value`, so
/// `1.005` becomes `1.01` rather than following its binary expansion.
/// Values outside the decimal range fall back to binary rounding.
pub fn format_decimals(places: usize, value: f64) -> String {
    let decimal = u32::try_from(places)
        .ok()
        .filter(|&dp| dp <= MAX_DECIMAL_PLACES)
        .filter(|_| value.is_finite())
        .and_then(|dp| Some((dp, Decimal::from_str(&value.to_string()).ok()?)));
    match decimal {
        Some((dp, decimal)) => {
            let rounded = decimal.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", places, rounded)
        }
        None => format!("{:.*}", places, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_bytes() {
        assert_eq!(hex_to_bytes("00ff10Ab").unwrap(), vec![0x00, 0xFF, 0x10, 0xAB]);
        assert_eq!(hex_to_bytes("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_hex_to_bytes_errors() {
        assert_eq!(hex_to_bytes("abc"), Err(TextError::OddLength(3)));
        assert_eq!(
            hex_to_bytes("0g"),
            Err(TextError::InvalidHexDigit { ch: 'g', index: 1 })
        );
        assert_eq!(
            hex_to_bytes("é0"),
            Err(TextError::InvalidHexDigit { ch: 'é', index: 0 })
        );
    }

    #[test]
    fn test_bytes_to_hex() {
        assert_eq!(bytes_to_hex(&[0x00, 0x0F, 0xA0, 0xFF]), "000fa0ff");
        assert_eq!(bytes_to_hex(&[]), "");
    }

    #[test]
    fn test_int_to_bytes_little_endian() {
        assert_eq!(int_to_bytes(0x12345678), [0x78, 0x56, 0x34, 0x12]);
        assert_eq!(int_to_bytes(-1), [0xFF; 4]);
    }

    #[test]
    fn test_bytes_to_int() {
        assert_eq!(bytes_to_int(&[0x78, 0x56, 0x34, 0x12]).unwrap(), 0x12345678);
        assert_eq!(bytes_to_int(&[0x01, 0, 0, 0, 0xEE]).unwrap(), 1);
        assert_eq!(
            bytes_to_int(&[1, 2]),
            Err(TextError::TooShort {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn test_unescape_basic() {
        assert_eq!(unescape_unicode("\\u4e2d\\u6587"), "中文");
        assert_eq!(unescape_unicode("a\\u0041b"), "aAb");
    }

    #[test]
    fn test_unescape_keeps_surrounding_text() {
        assert_eq!(unescape_unicode("name: \\u5f20 end"), "name: 张 end");
        assert_eq!(unescape_unicode("plain"), "plain");
    }

    #[test]
    fn test_unescape_surrogate_pair() {
        assert_eq!(unescape_unicode("\\ud83d\\ude00"), "😀");
    }

    #[test]
    fn test_unescape_invalid_escapes_verbatim() {
        assert_eq!(unescape_unicode("\\u12"), "\\u12");
        assert_eq!(unescape_unicode("\\uZZZZ!"), "\\uZZZZ!");
        assert_eq!(unescape_unicode("\\ud83d x"), "\\ud83d x");
        assert_eq!(unescape_unicode("\\u\\u0041"), "\\uA");
    }

    #[test]
    fn test_format_decimals() {
        assert_eq!(format_decimals(2, 3.14159), "3.14");
        assert_eq!(format_decimals(1, 2.26), "2.3");
        assert_eq!(format_decimals(0, 7.8), "8");
        assert_eq!(format_decimals(3, -1.0), "-1.000");
        assert_eq!(format_decimals(2, 1.0), "1.00");
    }

    #[test]
    fn test_format_decimals_rounds_half_up() {
        assert_eq!(format_decimals(0, 2.5), "3");
        assert_eq!(format_decimals(0, 0.5), "1");
        assert_eq!(format_decimals(1, 0.25), "0.3");
        assert_eq!(format_decimals(2, 1.005), "1.01");
        assert_eq!(format_decimals(2, -2.345), "-2.35");
        assert_eq!(format_decimals(0, -2.5), "-3");
    }

    #[test]
    fn test_format_decimals_outside_decimal_range() {
        assert_eq!(format_decimals(1, f64::INFINITY), "inf");
        assert_eq!(format_decimals(2, 1e30), format!("{:.2}", 1e30));
        assert_eq!(format_decimals(30, 0.5).len(), 32);
    }
}
