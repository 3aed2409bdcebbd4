//! Structure Marshal: fixed-layout records to bytes and back
//!
//! Prinsip desain:
//! - Declared layout: each record lists its fields once, no reflection
//! - No-Allocation staging: encoding goes through a reusable scratch region
//! - All-or-nothing: caller buffers are written only after a full encode

mod layout;
#[allow(clippy::module_inception)]
mod marshal;
mod record;

pub use layout::{Field, FieldKind, Layout, Packing};
pub use marshal::{
    bytes_to_structure, bytes_to_structure_at, global, release, structure_to_bytes,
    structure_to_bytes_into, Marshal, Records,
};
pub use record::{FieldReader, FieldWriter, Record};
