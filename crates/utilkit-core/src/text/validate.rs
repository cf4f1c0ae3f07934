//! Regex validators.
//!
//! All validators except [`contains_chinese`] require the whole input to
//! match. Patterns are compiled on first use and shared afterwards.

use once_cell::sync::Lazy;
use regex::Regex;

/// Mainland mobile numbers: 13x/14x/15x/17x/18x followed by eight digits.
static MOBILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:13[0-9]|14[0-9]|15[0-9]|17[0-9]|18[0-9])[0-9]{8}$").unwrap());

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_]+(?:[-.][A-Za-z0-9_]+)*@[A-Za-z0-9_]+(?:-[A-Za-z0-9_]+)*\.(?:[A-Za-z0-9_]+(?:-[A-Za-z0-9_]+)*\.)*[a-z]{2,3}$",
    )
    .unwrap()
});

/// Optional http(s) scheme, dotted host labels, alphabetic TLD, then anything.
static HTTP_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:http://|https://)?(?:(?:[A-Za-z0-9]+-[A-Za-z0-9]+|[A-Za-z0-9]+)\.)+[A-Za-z]+[/?:]?.*$")
        .unwrap()
});

/// Dotted-quad IPv4 with each octet in 0-255.
static IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9]?[0-9])$")
        .unwrap()
});

/// CJK unified ideographs and compatibility ideographs.
static CHINESE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{4E00}-\x{9FA5}\x{F900}-\x{FA2D}]").unwrap());

/// 8-18 digits, optionally with a lower- or upper-case check letter `x`.
static ID_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]{8,18}|[0-9x]{8,18}|[0-9X]{8,18})$").unwrap());

/// Whether `text` is a mainland mobile number.
pub fn is_mobile(text: &str) -> bool {
    MOBILE.is_match(text)
}

/// Whether `text` is an e-mail address with a 2-3 letter lower-case TLD.
pub fn is_email(text: &str) -> bool {
    EMAIL.is_match(text)
}

/// Whether `text` looks like an http or https URL. The scheme is optional.
pub fn is_http_url(text: &str) -> bool {
    HTTP_URL.is_match(text)
}

/// Whether `text` is a dotted-quad IPv4 literal.
pub fn is_ip(text: &str) -> bool {
    IPV4.is_match(text)
}

/// Whether `text` contains at least one Chinese character.
pub fn contains_chinese(text: &str) -> bool {
    CHINESE.is_match(text)
}

/// Whether `text` has the shape of an ID card number.
pub fn is_id_number(text: &str) -> bool {
    ID_NUMBER.is_match(text)
}
