//! Hex text: two characters per byte, high nibble first.
//!
//! Encoding always emits lowercase `0-9a-f`. Decoding accepts both cases.

use crate::error::{Error, Result};

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Lowercase hex representation of `bytes`.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    ::hex::encode(bytes)
}

/// Parses hex text back into bytes. Odd-length input and characters outside
/// `0-9`, `a-f`, `A-F` are rejected.
pub fn hex_to_bytes(text: &str) -> Result<Vec<u8>> {
    ::hex::decode(text).map_err(|e| Error::invalid(format_args!("malformed hex {text:?}: {e}")))
}

/// Maps a value in `0..=15` to its lowercase hex digit.
pub fn nibble_to_char(nibble: u8) -> Result<char> {
    DIGITS
        .get(usize::from(nibble))
        .map(|&digit| char::from(digit))
        .ok_or_else(|| Error::invalid(format_args!("nibble {nibble} is outside [0, 15]")))
}

/// Maps a hex digit (either case) to its value.
pub fn char_to_nibble(ch: char) -> Result<u8> {
    ch.to_digit(16)
        .map(|value| value as u8)
        .ok_or_else(|| Error::invalid(format_args!("{ch:?} is not a hex digit")))
}
