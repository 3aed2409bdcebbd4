//! Layout descriptors for fixed-size records.
//!
//! A record declares its fields once, in order. Offsets and the total width
//! are derived from that list and the packing rule, so no per-call storage is
//! needed to walk a layout.

use crate::codec::ScalarKind;
use crate::error::{Error, Result};

/// Type of a single record field. The kind fixes the field's byte width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar(ScalarKind),
    /// Fixed-size raw bytes, zero padded.
    Bytes(usize),
    /// Fixed-size text in the marshal's string encoding, NUL padded.
    Text(usize),
}

impl FieldKind {
    pub const fn width(self) -> usize {
        match self {
            FieldKind::Scalar(kind) => kind.width(),
            FieldKind::Bytes(len) | FieldKind::Text(len) => len,
        }
    }

    /// Natural alignment: scalars align to their width, byte runs to 1.
    pub const fn align(self) -> usize {
        match self {
            FieldKind::Scalar(kind) => kind.width(),
            FieldKind::Bytes(_) | FieldKind::Text(_) => 1,
        }
    }

    pub fn describe(self) -> String {
        match self {
            FieldKind::Scalar(kind) => kind.name().to_owned(),
            FieldKind::Bytes(len) => format!("[u8; {len}]"),
            FieldKind::Text(len) => format!("text[{len}]"),
        }
    }
}

/// One entry of a layout descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

macro_rules! scalar_field_ctors {
    ($($fn_name:ident => $kind:ident),* $(,)?) => {$(
        pub const fn $fn_name(name: &'static str) -> Self {
            Self::new(name, FieldKind::Scalar(ScalarKind::$kind))
        }
    )*};
}

impl Field {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    scalar_field_ctors! {
        bool => Bool,
        u8 => U8,
        i16 => I16,
        u16 => U16,
        i32 => I32,
        u32 => U32,
        i64 => I64,
        u64 => U64,
        f32 => F32,
        f64 => F64,
    }

    pub const fn bytes(name: &'static str, len: usize) -> Self {
        Self::new(name, FieldKind::Bytes(len))
    }

    pub const fn text(name: &'static str, len: usize) -> Self {
        Self::new(name, FieldKind::Text(len))
    }
}

/// How field offsets are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Packing {
    /// Fields follow each other with no padding.
    #[default]
    Packed,
    /// Each field starts at a multiple of its alignment and the total width
    /// is padded to the largest alignment, like a `#[repr(C)]` struct.
    Natural,
}

#[inline(always)]
fn align_up(offset: usize, align: usize) -> Option<usize> {
    match offset % align {
        0 => Some(offset),
        rem => offset.checked_add(align - rem),
    }
}

/// A borrowed layout descriptor plus its packing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout<'a> {
    fields: &'a [Field],
    packing: Packing,
}

impl<'a> Layout<'a> {
    pub const fn new(fields: &'a [Field], packing: Packing) -> Self {
        Self { fields, packing }
    }

    pub fn fields(&self) -> &'a [Field] {
        self.fields
    }

    pub fn packing(&self) -> Packing {
        self.packing
    }

    /// Offset at which a field of `kind` starts when the previous field ended
    /// at `cursor`. Saturates at `usize::MAX`.
    #[inline(always)]
    pub fn place(&self, cursor: usize, kind: FieldKind) -> usize {
        match self.packing {
            Packing::Packed => cursor,
            Packing::Natural => align_up(cursor, kind.align()).unwrap_or(usize::MAX),
        }
    }

    /// Iterator over `(offset, field)` pairs.
    pub fn offsets(&self) -> impl Iterator<Item = (usize, &'a Field)> + 'a {
        let layout = *self;
        let mut cursor = 0usize;
        self.fields.iter().map(move |field| {
            let offset = layout.place(cursor, field.kind);
            cursor = offset.saturating_add(field.kind.width());
            (offset, field)
        })
    }

    /// Total encoded width in bytes, including trailing padding.
    ///
    /// A layout whose width does not fit in `usize` is an `InvalidArgument`.
    pub fn try_width(&self) -> Result<usize> {
        let overflow = || {
            Error::invalid(format_args!(
                "layout of {} fields overflows usize",
                self.fields.len()
            ))
        };
        let mut end = 0usize;
        for field in self.fields {
            let offset = match self.packing {
                Packing::Packed => end,
                Packing::Natural => align_up(end, field.kind.align()).ok_or_else(overflow)?,
            };
            end = offset.checked_add(field.kind.width()).ok_or_else(overflow)?;
        }
        match self.packing {
            Packing::Packed => Ok(end),
            Packing::Natural => {
                let max_align = self.fields.iter().map(|f| f.kind.align()).max().unwrap_or(1);
                align_up(end, max_align).ok_or_else(overflow)
            }
        }
    }

    /// [`Layout::try_width`], saturating at `usize::MAX` so that any bounds
    /// check against a real buffer fails.
    pub fn width(&self) -> usize {
        self.try_width().unwrap_or(usize::MAX)
    }
}
