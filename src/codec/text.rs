//! Variable-width text encoding.

use serde::{Deserialize, Serialize};

use crate::error::{check_range, Error, Result};

/// Byte-text codec used for strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    /// ISO-8859-1: one byte per code point, code points above U+00FF are
    /// rejected on encode.
    Latin1,
}

impl StringEncoding {
    /// Encodes `text` into a new buffer.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            StringEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            StringEncoding::Utf16Le => {
                Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect())
            }
            StringEncoding::Utf16Be => {
                Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect())
            }
            StringEncoding::Latin1 => text
                .chars()
                .map(|ch| {
                    u8::try_from(u32::from(ch)).map_err(|_| {
                        Error::invalid(format_args!(
                            "character {ch:?} is not representable in latin1"
                        ))
                    })
                })
                .collect(),
        }
    }

    /// Decodes `bytes`. Invalid sequences become U+FFFD; only a UTF-16
    /// buffer of odd length is an error.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            StringEncoding::Utf8 => Ok(String::from_utf8_lossy(bytes).into_owned()),
            StringEncoding::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
            StringEncoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
            StringEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(Error::invalid(format_args!(
            "utf16 input has odd length {}",
            bytes.len()
        )));
    }
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    Ok(char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect())
}

/// Decodes the whole buffer as UTF-8.
pub fn get_string(buffer: &[u8]) -> Result<String> {
    StringEncoding::Utf8.decode(buffer)
}

pub fn get_string_with(buffer: &[u8], encoding: StringEncoding) -> Result<String> {
    encoding.decode(buffer)
}

/// Decodes `length` bytes starting at `offset` as UTF-8.
pub fn get_string_at(buffer: &[u8], offset: usize, length: usize) -> Result<String> {
    get_string_at_with(buffer, offset, length, StringEncoding::Utf8)
}

pub fn get_string_at_with(
    buffer: &[u8],
    offset: usize,
    length: usize,
    encoding: StringEncoding,
) -> Result<String> {
    check_range(buffer.len(), offset, length)?;
    encoding.decode(&buffer[offset..offset + length])
}

/// UTF-8 bytes of `text`.
pub fn string_to_bytes(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

pub fn string_to_bytes_with(text: &str, encoding: StringEncoding) -> Result<Vec<u8>> {
    encoding.encode(text)
}

/// Writes the encoded `text` into `buffer` at `offset` and returns the number
/// of bytes written. Nothing is written unless the whole encoding fits.
pub fn string_into(
    text: &str,
    buffer: &mut [u8],
    offset: usize,
    encoding: StringEncoding,
) -> Result<usize> {
    let encoded = encoding.encode(text)?;
    check_range(buffer.len(), offset, encoded.len())?;
    buffer[offset..offset + encoded.len()].copy_from_slice(&encoded);
    Ok(encoded.len())
}
