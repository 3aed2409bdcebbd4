//! bytemarshal - bounds-checked binary marshalling
//!
//! Arsitektur:
//! - Scalar Codec: stateless value <-> bytes conversion, little-endian default
//! - Structure Marshal: declared-layout records staged through a reusable
//!   scratch region
//! - Checked access: every offset is validated before memory is touched

#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod convert;
pub mod core;
pub mod error;
pub mod marshal;
pub mod math;

pub use crate::codec::{Endianness, Scalar, ScalarKind, StringEncoding};
pub use crate::config::MarshalConfig;
pub use crate::error::{Error, Result};
pub use crate::marshal::{Field, FieldReader, FieldWriter, Marshal, Packing, Record};
