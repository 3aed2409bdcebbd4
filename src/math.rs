//! 32-bit integer arithmetic with two's-complement wrapping.

use crate::error::{Error, Result};

#[inline(always)]
pub fn add(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

#[inline(always)]
pub fn sub(a: i32, b: i32) -> i32 {
    a.wrapping_sub(b)
}

#[inline(always)]
pub fn mul(a: i32, b: i32) -> i32 {
    a.wrapping_mul(b)
}

/// Truncating division. A zero divisor is an error; `i32::MIN / -1` wraps.
#[inline(always)]
pub fn div(a: i32, b: i32) -> Result<i32> {
    if b == 0 {
        return Err(Error::DivideByZero);
    }
    Ok(a.wrapping_div(b))
}
