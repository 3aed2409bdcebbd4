//! The `Record` contract and the cursors that walk a layout descriptor.

use crate::codec::{Endianness, Scalar, StringEncoding};
use crate::error::{Error, Result};

use super::layout::{Field, FieldKind, Layout, Packing};

/// A fixed-layout value that the structure marshal can encode and decode.
///
/// `FIELDS` is the layout descriptor. `write_fields` must emit one value per
/// descriptor entry, in order, and `read_fields` must consume them in the same
/// order; the cursors reject anything else.
///
/// ```
/// use bytemarshal::marshal::{Field, FieldReader, FieldWriter, Record};
/// use bytemarshal::Result;
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Record for Point {
///     const FIELDS: &'static [Field] = &[Field::i32("x"), Field::i32("y")];
///
///     fn write_fields(&self, out: &mut FieldWriter<'_>) -> Result<()> {
///         out.put(self.x)?;
///         out.put(self.y)
///     }
///
///     fn read_fields(input: &mut FieldReader<'_>) -> Result<Self> {
///         Ok(Point { x: input.get()?, y: input.get()? })
///     }
/// }
///
/// let bytes = bytemarshal::marshal::structure_to_bytes(&Point { x: 1, y: -1 })?;
/// assert_eq!(bytes, [1, 0, 0, 0, 0xff, 0xff, 0xff, 0xff]);
/// # Ok::<(), bytemarshal::Error>(())
/// ```
pub trait Record: Sized {
    const FIELDS: &'static [Field];
    const PACKING: Packing = Packing::Packed;

    fn write_fields(&self, out: &mut FieldWriter<'_>) -> Result<()>;

    fn read_fields(input: &mut FieldReader<'_>) -> Result<Self>;

    fn layout() -> Layout<'static> {
        Layout::new(Self::FIELDS, Self::PACKING)
    }

    /// Encoded width in bytes.
    fn width() -> usize {
        Self::layout().width()
    }

    /// Encoded width, or `InvalidArgument` when the layout overflows `usize`.
    fn try_width() -> Result<usize> {
        Self::layout().try_width()
    }
}

/// Position inside a layout: which field comes next and where it starts.
#[derive(Debug)]
struct Cursor {
    layout: Layout<'static>,
    index: usize,
    end: usize,
}

impl Cursor {
    fn new(layout: Layout<'static>) -> Self {
        Self { layout, index: 0, end: 0 }
    }

    /// Claims the next field, which must have `kind`. Returns its offset.
    fn advance(
        &mut self,
        matches: impl Fn(FieldKind) -> bool,
        wanted: &str,
    ) -> Result<(usize, Field)> {
        let field = *self.layout.fields().get(self.index).ok_or_else(|| {
            Error::invalid(format_args!(
                "record has {} fields but a {wanted} value was supplied past the end",
                self.layout.fields().len()
            ))
        })?;
        if !matches(field.kind) {
            return Err(Error::invalid(format_args!(
                "field `{}` is declared as {} but a {wanted} value was supplied",
                field.name,
                field.kind.describe()
            )));
        }
        let offset = self.layout.place(self.end, field.kind);
        self.end = offset + field.kind.width();
        self.index += 1;
        Ok((offset, field))
    }

    fn finish(&self) -> Result<()> {
        let fields = self.layout.fields();
        match fields.get(self.index) {
            None => Ok(()),
            Some(field) => Err(Error::invalid(format_args!(
                "field `{}` was never visited ({} of {} fields handled)",
                field.name,
                self.index,
                fields.len()
            ))),
        }
    }
}

/// Encodes field values into a region of exactly the record's width.
///
/// The region is zeroed on creation, so padding and unused tails of byte and
/// text fields are always 0.
#[derive(Debug)]
pub struct FieldWriter<'a> {
    out: &'a mut [u8],
    cursor: Cursor,
    order: Endianness,
    encoding: StringEncoding,
}

impl<'a> FieldWriter<'a> {
    pub(crate) fn new(
        layout: Layout<'static>,
        out: &'a mut [u8],
        order: Endianness,
        encoding: StringEncoding,
    ) -> Self {
        out.fill(0);
        Self {
            out,
            cursor: Cursor::new(layout),
            order,
            encoding,
        }
    }

    /// Writes the next field, which must be declared as `T`.
    #[inline(always)]
    pub fn put<T: Scalar>(&mut self, value: T) -> Result<()> {
        let (offset, _) = self
            .cursor
            .advance(|kind| kind == FieldKind::Scalar(T::KIND), T::KIND.name())?;
        value.encode(&mut self.out[offset..offset + T::WIDTH], self.order);
        Ok(())
    }

    /// Writes the next `Bytes(n)` field. Shorter input is zero padded.
    pub fn put_bytes(&mut self, value: &[u8]) -> Result<()> {
        let (offset, field) = self
            .cursor
            .advance(|kind| matches!(kind, FieldKind::Bytes(_)), "byte array")?;
        copy_padded(field, value, &mut self.out[offset..offset + field.kind.width()])
    }

    /// Writes the next `Text(n)` field in the marshal's string encoding.
    pub fn put_text(&mut self, value: &str) -> Result<()> {
        let encoded = self.encoding.encode(value)?;
        let (offset, field) = self
            .cursor
            .advance(|kind| matches!(kind, FieldKind::Text(_)), "text")?;
        copy_padded(field, &encoded, &mut self.out[offset..offset + field.kind.width()])
    }

    /// Fails unless every declared field was written.
    pub(crate) fn finish(self) -> Result<()> {
        self.cursor.finish()
    }
}

fn copy_padded(field: Field, value: &[u8], slot: &mut [u8]) -> Result<()> {
    if value.len() > slot.len() {
        return Err(Error::invalid(format_args!(
            "field `{}` holds {} bytes but {} were supplied",
            field.name,
            slot.len(),
            value.len()
        )));
    }
    slot[..value.len()].copy_from_slice(value);
    Ok(())
}

/// Decodes field values from a region of exactly the record's width.
#[derive(Debug)]
pub struct FieldReader<'a> {
    input: &'a [u8],
    cursor: Cursor,
    order: Endianness,
    encoding: StringEncoding,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(
        layout: Layout<'static>,
        input: &'a [u8],
        order: Endianness,
        encoding: StringEncoding,
    ) -> Self {
        Self {
            input,
            cursor: Cursor::new(layout),
            order,
            encoding,
        }
    }

    /// Reads the next field, which must be declared as `T`.
    #[inline(always)]
    pub fn get<T: Scalar>(&mut self) -> Result<T> {
        let (offset, _) = self
            .cursor
            .advance(|kind| kind == FieldKind::Scalar(T::KIND), T::KIND.name())?;
        Ok(T::decode(&self.input[offset..offset + T::WIDTH], self.order))
    }

    /// Borrows the raw contents of the next `Bytes(n)` field.
    pub fn get_bytes(&mut self) -> Result<&'a [u8]> {
        let (offset, field) = self
            .cursor
            .advance(|kind| matches!(kind, FieldKind::Bytes(_)), "byte array")?;
        let input: &'a [u8] = self.input;
        Ok(&input[offset..offset + field.kind.width()])
    }

    /// Reads the next `Bytes(N)` field into an array. The declared length must
    /// be exactly `N`.
    pub fn get_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let (offset, field) = self
            .cursor
            .advance(|kind| kind == FieldKind::Bytes(N), "byte array")?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.input[offset..offset + field.kind.width()]);
        Ok(out)
    }

    /// Reads the next `Text(n)` field, dropping trailing NUL padding.
    pub fn get_text(&mut self) -> Result<String> {
        let (offset, field) = self
            .cursor
            .advance(|kind| matches!(kind, FieldKind::Text(_)), "text")?;
        let raw = &self.input[offset..offset + field.kind.width()];
        self.encoding.decode(trim_nul(raw, self.encoding))
    }

    pub(crate) fn finish(self) -> Result<()> {
        self.cursor.finish()
    }
}

fn trim_nul(raw: &[u8], encoding: StringEncoding) -> &[u8] {
    let unit = match encoding {
        StringEncoding::Utf16Le | StringEncoding::Utf16Be => 2,
        StringEncoding::Utf8 | StringEncoding::Latin1 => 1,
    };
    let mut end = raw.len() - raw.len() % unit;
    while end >= unit && raw[end - unit..end].iter().all(|&b| b == 0) {
        end -= unit;
    }
    &raw[..end]
}
