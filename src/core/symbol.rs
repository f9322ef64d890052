//! Ordinal values for the 62-symbol alphabet.
//!
//! Digits map to 0-9, lowercase letters to 10-35 and uppercase letters to
//! 36-61. Anything else has no value and passes through the codec untouched.

/// Number of supported symbols.
pub const ALPHABET_SIZE: u8 = 62;

const LOWER_OFFSET: u8 = 10;
const UPPER_OFFSET: u8 = 36;

/// Returns the ordinal value of `symbol`, or `None` for unsupported characters.
///
/// Only ASCII digits and letters are supported; other Unicode digits and
/// letters (e.g. `'٣'` or `'é'`) are unsupported.
pub fn value_of(symbol: char) -> Option<u8> {
    match symbol {
        '0'..='9' => Some(symbol as u8 - b'0'),
        'a'..='z' => Some(symbol as u8 - b'a' + LOWER_OFFSET),
        'A'..='Z' => Some(symbol as u8 - b'A' + UPPER_OFFSET),
        _ => None,
    }
}

/// Inverse of [`value_of`]: the symbol carrying `value`, if any.
pub fn symbol_of(value: u8) -> Option<char> {
    match value {
        0..=9 => Some((b'0' + value) as char),
        10..=35 => Some((b'a' + value - LOWER_OFFSET) as char),
        36..=61 => Some((b'A' + value - UPPER_OFFSET) as char),
        _ => None,
    }
}

/// Whether `symbol` belongs to the supported alphabet.
#[inline]
pub fn is_supported(symbol: char) -> bool {
    value_of(symbol).is_some()
}
