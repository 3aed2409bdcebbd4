//! Bit fields inside a 32-bit word. Bit 0 is the least-significant bit.

use crate::error::{Error, Result};

const WORD_BITS: u32 = 32;

#[inline(always)]
fn field_mask(start: u32, width: u32) -> Result<u32> {
    if start >= WORD_BITS {
        return Err(Error::invalid(format_args!("bit start {start} is outside [0, 31]")));
    }
    if width > WORD_BITS - start {
        return Err(Error::invalid(format_args!(
            "bit field [{start}, {}) does not fit in a 32-bit word",
            start + width
        )));
    }
    let low = if width == WORD_BITS { u32::MAX } else { (1u32 << width) - 1 };
    Ok(low << start)
}

/// Replaces bits `[start, start + width)` of `word` with `value`.
///
/// `value` must be non-negative and fit in `width` bits.
pub fn set_bit_value(word: i32, start: u32, value: i32, width: u32) -> Result<i32> {
    if value < 0 {
        return Err(Error::invalid(format_args!("bit value {value} is negative")));
    }
    let mask = field_mask(start, width)?;
    let value = value as u32;
    if width < WORD_BITS && value >> width != 0 {
        return Err(Error::invalid(format_args!(
            "bit value {value} does not fit in {width} bits"
        )));
    }
    Ok(((word as u32 & !mask) | (value << start)) as i32)
}

/// Reads bits `[start, start + width)` of `word`, shifted down to bit 0.
pub fn get_bit_value(word: i32, start: u32, width: u32) -> Result<i32> {
    let mask = field_mask(start, width)?;
    Ok(((word as u32 & mask) >> start) as i32)
}
