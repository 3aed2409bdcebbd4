//! Fixed-width scalar encoding.
//!
//! Every scalar has a fixed byte width. Multi-byte values honour an explicit
//! [`Endianness`]; the named helpers (`get_int32`, `get_bytes`, ...) use
//! [`DEFAULT_ENDIANNESS`], which is little-endian.
//!
//! Floats go through the integer of equal width (`f32::to_bits`), so an
//! `f32` and the `u32` holding its bit pattern produce identical bytes.

use serde::{Deserialize, Serialize};

use crate::error::{check_range, Error, Result};

/// Byte order for multi-byte scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    /// Least-significant byte first.
    #[default]
    Little,
    /// Most-significant byte first.
    Big,
}

/// Byte order used by the named helpers.
pub const DEFAULT_ENDIANNESS: Endianness = Endianness::Little;

/// Tag identifying a scalar type inside a layout descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl ScalarKind {
    /// Encoded width in bytes.
    pub const fn width(self) -> usize {
        match self {
            ScalarKind::Bool | ScalarKind::U8 => 1,
            ScalarKind::I16 | ScalarKind::U16 => 2,
            ScalarKind::I32 | ScalarKind::U32 | ScalarKind::F32 => 4,
            ScalarKind::I64 | ScalarKind::U64 | ScalarKind::F64 => 8,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::U8 => "u8",
            ScalarKind::I16 => "i16",
            ScalarKind::U16 => "u16",
            ScalarKind::I32 => "i32",
            ScalarKind::U32 => "u32",
            ScalarKind::I64 => "i64",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
        }
    }
}

/// A value with a fixed-width binary encoding.
///
/// `decode` and `encode` receive a slice of exactly [`Scalar::WIDTH`] bytes;
/// range checks happen in [`read`] and [`write`] before they are called.
pub trait Scalar: Copy {
    const WIDTH: usize;
    const KIND: ScalarKind;

    fn decode(bytes: &[u8], order: Endianness) -> Self;

    fn encode(self, out: &mut [u8], order: Endianness);
}

macro_rules! impl_int_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Scalar for $ty {
            const WIDTH: usize = std::mem::size_of::<$ty>();
            const KIND: ScalarKind = ScalarKind::$kind;

            #[inline(always)]
            fn decode(bytes: &[u8], order: Endianness) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                match order {
                    Endianness::Little => <$ty>::from_le_bytes(raw),
                    Endianness::Big => <$ty>::from_be_bytes(raw),
                }
            }

            #[inline(always)]
            fn encode(self, out: &mut [u8], order: Endianness) {
                let raw = match order {
                    Endianness::Little => self.to_le_bytes(),
                    Endianness::Big => self.to_be_bytes(),
                };
                out.copy_from_slice(&raw);
            }
        }
    )*};
}

impl_int_scalar! {
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
}

impl Scalar for bool {
    const WIDTH: usize = 1;
    const KIND: ScalarKind = ScalarKind::Bool;

    #[inline(always)]
    fn decode(bytes: &[u8], _order: Endianness) -> Self {
        bytes[0] != 0
    }

    #[inline(always)]
    fn encode(self, out: &mut [u8], _order: Endianness) {
        out[0] = u8::from(self);
    }
}

impl Scalar for f32 {
    const WIDTH: usize = 4;
    const KIND: ScalarKind = ScalarKind::F32;

    #[inline(always)]
    fn decode(bytes: &[u8], order: Endianness) -> Self {
        f32::from_bits(u32::decode(bytes, order))
    }

    #[inline(always)]
    fn encode(self, out: &mut [u8], order: Endianness) {
        self.to_bits().encode(out, order);
    }
}

impl Scalar for f64 {
    const WIDTH: usize = 8;
    const KIND: ScalarKind = ScalarKind::F64;

    #[inline(always)]
    fn decode(bytes: &[u8], order: Endianness) -> Self {
        f64::from_bits(u64::decode(bytes, order))
    }

    #[inline(always)]
    fn encode(self, out: &mut [u8], order: Endianness) {
        self.to_bits().encode(out, order);
    }
}

/// Reads a `T` at `offset`.
#[inline(always)]
pub fn read<T: Scalar>(buffer: &[u8], offset: usize, order: Endianness) -> Result<T> {
    check_range(buffer.len(), offset, T::WIDTH)?;
    Ok(T::decode(&buffer[offset..offset + T::WIDTH], order))
}

/// Writes `value` at `offset`. The buffer is untouched on error.
#[inline(always)]
pub fn write<T: Scalar>(
    value: T,
    buffer: &mut [u8],
    offset: usize,
    order: Endianness,
) -> Result<()> {
    check_range(buffer.len(), offset, T::WIDTH)?;
    value.encode(&mut buffer[offset..offset + T::WIDTH], order);
    Ok(())
}

/// Encodes `value` into a freshly allocated buffer of `T::WIDTH` bytes.
pub fn to_bytes<T: Scalar>(value: T, order: Endianness) -> Vec<u8> {
    let mut out = vec![0u8; T::WIDTH];
    value.encode(&mut out, order);
    out
}

pub fn get_bool(buffer: &[u8]) -> Result<bool> {
    get_bool_at(buffer, 0)
}

pub fn get_bool_at(buffer: &[u8], offset: usize) -> Result<bool> {
    if buffer.is_empty() {
        return Err(Error::invalid("buffer is empty"));
    }
    read(buffer, offset, DEFAULT_ENDIANNESS)
}

pub fn get_int16(buffer: &[u8]) -> Result<i16> {
    get_int16_at(buffer, 0)
}

pub fn get_int16_at(buffer: &[u8], offset: usize) -> Result<i16> {
    read(buffer, offset, DEFAULT_ENDIANNESS)
}

pub fn get_uint16(buffer: &[u8]) -> Result<u16> {
    get_uint16_at(buffer, 0)
}

pub fn get_uint16_at(buffer: &[u8], offset: usize) -> Result<u16> {
    read(buffer, offset, DEFAULT_ENDIANNESS)
}

pub fn get_int32(buffer: &[u8]) -> Result<i32> {
    get_int32_at(buffer, 0)
}

pub fn get_int32_at(buffer: &[u8], offset: usize) -> Result<i32> {
    read(buffer, offset, DEFAULT_ENDIANNESS)
}

pub fn get_uint32(buffer: &[u8]) -> Result<u32> {
    get_uint32_at(buffer, 0)
}

pub fn get_uint32_at(buffer: &[u8], offset: usize) -> Result<u32> {
    read(buffer, offset, DEFAULT_ENDIANNESS)
}

pub fn get_int64(buffer: &[u8]) -> Result<i64> {
    get_int64_at(buffer, 0)
}

pub fn get_int64_at(buffer: &[u8], offset: usize) -> Result<i64> {
    read(buffer, offset, DEFAULT_ENDIANNESS)
}

pub fn get_uint64(buffer: &[u8]) -> Result<u64> {
    get_uint64_at(buffer, 0)
}

pub fn get_uint64_at(buffer: &[u8], offset: usize) -> Result<u64> {
    read(buffer, offset, DEFAULT_ENDIANNESS)
}

pub fn get_single(buffer: &[u8]) -> Result<f32> {
    get_single_at(buffer, 0)
}

pub fn get_single_at(buffer: &[u8], offset: usize) -> Result<f32> {
    read(buffer, offset, DEFAULT_ENDIANNESS)
}

pub fn get_double(buffer: &[u8]) -> Result<f64> {
    get_double_at(buffer, 0)
}

pub fn get_double_at(buffer: &[u8], offset: usize) -> Result<f64> {
    read(buffer, offset, DEFAULT_ENDIANNESS)
}

/// Inverse of the `get_*` readers: encodes any scalar in the default byte
/// order.
pub fn get_bytes<T: Scalar>(value: T) -> Vec<u8> {
    to_bytes(value, DEFAULT_ENDIANNESS)
}

/// Writes `value` into `buffer` at `offset` in the default byte order.
pub fn get_bytes_into<T: Scalar>(value: T, buffer: &mut [u8], offset: usize) -> Result<()> {
    write(value, buffer, offset, DEFAULT_ENDIANNESS)
}
