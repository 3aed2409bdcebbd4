//! Text-to-value conversion helpers.

use std::any::type_name;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Parses `text` as a `T`.
///
/// Failures are reported as [`Error::FormatConversion`] carrying the source
/// text, the target type name and the parser's message.
pub fn parse_value<T>(text: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.parse::<T>()
        .map_err(|e| Error::conversion(text, type_name::<T>(), e))
}

/// Like [`parse_value`] but falls back to `default` for missing or
/// malformed input.
pub fn parse_value_or<T: FromStr>(text: Option<&str>, default: T) -> T {
    text.and_then(|t| t.parse().ok()).unwrap_or(default)
}

/// Parses every item, stopping at the first failure.
pub fn parse_values<T, S>(items: &[S]) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    S: AsRef<str>,
{
    items.iter().map(|item| parse_value(item.as_ref())).collect()
}

/// Splits `text` on `separator` and parses each piece as a `T`.
///
/// Empty input yields an empty vector. A failing piece is reported against the
/// whole input.
pub fn split_to_array<T>(text: &str, separator: char) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(separator)
        .map(|piece| {
            piece
                .trim()
                .parse::<T>()
                .map_err(|e| Error::conversion(text, type_name::<T>(), e))
        })
        .collect()
}

/// Splits `text` on `separator`, trimming whitespace from each piece.
pub fn split_trimmed(text: &str, separator: char) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(separator).map(str::trim).collect()
}

/// Reads one line starting at byte `position` and advances `position` past
/// its terminator (`\n`, `\r` or `\r\n`). Returns `None` once the text is
/// exhausted.
pub fn read_line<'a>(text: &'a str, position: &mut usize) -> Option<&'a str> {
    let rest = text.get(*position..)?;
    if rest.is_empty() {
        return None;
    }
    match rest.find(['\r', '\n']) {
        Some(end) => {
            let line = &rest[..end];
            let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
            *position += end + terminator;
            Some(line)
        }
        None => {
            *position = text.len();
            Some(rest)
        }
    }
}

/// All lines of `text`, any terminator style.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut position = 0;
    std::iter::from_fn(|| read_line(text, &mut position)).collect()
}

/// `"rrggbb"` in lowercase hex.
pub fn rgb_hex_string(r: u8, g: u8, b: u8) -> String {
    format!("{r:02x}{g:02x}{b:02x}")
}

/// `"rgb(r,g,b)"`.
pub fn rgb_string(r: u8, g: u8, b: u8) -> String {
    format!("rgb({r},{g},{b})")
}
