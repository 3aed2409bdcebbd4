//! Scalar codec: bounds-checked conversion between values and bytes
//!
//! Prinsip desain:
//! - Stateless: every function only touches the caller's buffer
//! - Checked: `offset + width <= len` is verified before any access
//! - Explicit byte order: little-endian unless a caller asks otherwise

pub mod bits;
pub mod hex;
pub mod scalar;
pub mod text;

pub use self::bits::{get_bit_value, set_bit_value};
pub use self::hex::{bytes_to_hex, char_to_nibble, hex_to_bytes, nibble_to_char};
pub use self::scalar::{
    get_bool, get_bool_at, get_bytes, get_bytes_into, get_double, get_double_at, get_int16,
    get_int16_at, get_int32, get_int32_at, get_int64, get_int64_at, get_single, get_single_at,
    get_uint16, get_uint16_at, get_uint32, get_uint32_at, get_uint64, get_uint64_at, read,
    to_bytes, write, Endianness, Scalar, ScalarKind, DEFAULT_ENDIANNESS,
};
pub use self::text::{
    get_string, get_string_at, get_string_at_with, get_string_with, string_into,
    string_to_bytes, string_to_bytes_with, StringEncoding,
};
