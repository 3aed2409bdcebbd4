//! Structure marshal backed by a reusable scratch region.
//!
//! Encode dilakukan ke scratch buffer internal lalu di-copy keluar, jadi
//! caller tidak pernah memegang referensi ke memori scratch.

use std::marker::PhantomData;

use log::trace;
use parking_lot::{const_mutex, Mutex, MutexGuard};

use crate::codec::{Endianness, StringEncoding};
use crate::config::MarshalConfig;
use crate::core::ScratchBuffer;
use crate::error::{check_range, Error, Result};

use super::record::{FieldReader, FieldWriter, Record};

/// Record encoder/decoder that owns its staging memory.
///
/// Every call takes `&mut self`, so at most one marshal call can be in flight
/// per instance. Use one instance per thread, or the lock-protected
/// [`global`] instance.
#[derive(Debug)]
pub struct Marshal {
    scratch: ScratchBuffer,
    order: Endianness,
    encoding: StringEncoding,
}

impl Default for Marshal {
    fn default() -> Self {
        Self::new()
    }
}

impl Marshal {
    /// Little-endian, UTF-8, 2048-byte blocks. Does not allocate.
    pub const fn new() -> Self {
        Self {
            scratch: ScratchBuffer::new(),
            order: Endianness::Little,
            encoding: StringEncoding::Utf8,
        }
    }

    pub fn with_config(config: &MarshalConfig) -> Self {
        Self {
            scratch: ScratchBuffer::with_block_size(config.block_size),
            order: config.endianness,
            encoding: config.string_encoding,
        }
    }

    pub fn endianness(&self) -> Endianness {
        self.order
    }

    pub fn string_encoding(&self) -> StringEncoding {
        self.encoding
    }

    /// Current scratch capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.scratch.capacity()
    }

    /// Returns the scratch memory. The next marshal call allocates again.
    pub fn release(&mut self) {
        self.scratch.release();
    }

    /// Encodes `record` into the scratch region and borrows the result.
    fn stage<R: Record>(&mut self, record: &R) -> Result<&[u8]> {
        let layout = R::layout();
        let width = layout.try_width()?;
        trace!("staging {width}-byte record ({} fields)", layout.fields().len());

        let region = self.scratch.region_mut(width)?;
        let mut writer = FieldWriter::new(layout, region, self.order, self.encoding);
        record.write_fields(&mut writer)?;
        writer.finish()?;

        let staged: &[u8] = self.scratch.region_mut(width)?;
        Ok(staged)
    }

    /// Encodes `record` into a new buffer of exactly `R::width()` bytes.
    pub fn structure_to_bytes<R: Record>(&mut self, record: &R) -> Result<Vec<u8>> {
        Ok(self.stage(record)?.to_vec())
    }

    /// Encodes `record` into `buffer` starting at `start_index` and returns
    /// the number of bytes written.
    ///
    /// `buffer` is only written after the whole record encoded successfully.
    pub fn structure_to_bytes_into<R: Record>(
        &mut self,
        record: &R,
        buffer: &mut [u8],
        start_index: usize,
    ) -> Result<usize> {
        let width = R::try_width()?;
        check_range(buffer.len(), start_index, width)?;
        let staged = self.stage(record)?;
        buffer[start_index..start_index + width].copy_from_slice(staged);
        Ok(width)
    }

    /// Encodes `records` back to back into one new buffer.
    pub fn structures_to_bytes<R: Record>(&mut self, records: &[R]) -> Result<Vec<u8>> {
        let width = R::try_width()?;
        let total = width.checked_mul(records.len()).ok_or_else(|| {
            Error::invalid(format_args!(
                "{} records of {width} bytes overflow usize",
                records.len()
            ))
        })?;
        let mut out = vec![0u8; total];
        for (index, record) in records.iter().enumerate() {
            self.structure_to_bytes_into(record, &mut out, index * width)?;
        }
        Ok(out)
    }

    /// Decodes a `T` from the start of `buffer`.
    pub fn bytes_to_structure<T: Record>(&self, buffer: &[u8]) -> Result<T> {
        self.bytes_to_structure_at(buffer, 0)
    }

    /// Decodes a `T` from `buffer` at `start_index`.
    pub fn bytes_to_structure_at<T: Record>(&self, buffer: &[u8], start_index: usize) -> Result<T> {
        let layout = T::layout();
        let width = layout.try_width()?;
        check_range(buffer.len(), start_index, width)?;

        let mut reader = FieldReader::new(
            layout,
            &buffer[start_index..start_index + width],
            self.order,
            self.encoding,
        );
        let record = T::read_fields(&mut reader)?;
        reader.finish()?;
        Ok(record)
    }

    /// Iterates over consecutive `T` records in `buffer`. A trailing partial
    /// record is reported as an error by the last item.
    pub fn records<'a, T: Record>(&'a self, buffer: &'a [u8]) -> Records<'a, T> {
        Records {
            marshal: self,
            buffer,
            offset: 0,
            _record: PhantomData,
        }
    }
}

/// Iterator returned by [`Marshal::records`].
pub struct Records<'a, T> {
    marshal: &'a Marshal,
    buffer: &'a [u8],
    offset: usize,
    _record: PhantomData<fn() -> T>,
}

impl<'a, T: Record> Iterator for Records<'a, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.buffer.len() {
            return None;
        }
        let width = T::width();
        let item = self.marshal.bytes_to_structure_at(self.buffer, self.offset);
        // A zero-width record or a decode error ends the iteration.
        self.offset = match (&item, width) {
            (Ok(_), width) if width > 0 => self.offset + width,
            _ => self.buffer.len(),
        };
        Some(item)
    }
}

static GLOBAL: Mutex<Marshal> = const_mutex(Marshal::new());

/// Decoding never touches scratch memory, so the free decode functions use
/// this unlocked default instance instead of [`GLOBAL`].
static DECODER: Marshal = Marshal::new();

/// Locks the process-wide marshal for the lifetime of the guard.
///
/// The lock is not re-entrant: the free [`structure_to_bytes`],
/// [`structure_to_bytes_into`] and [`release`] functions must not be called
/// while the guard is alive. The free decode functions do not lock.
pub fn global() -> MutexGuard<'static, Marshal> {
    GLOBAL.lock()
}

/// [`Marshal::structure_to_bytes`] on the process-wide instance.
pub fn structure_to_bytes<R: Record>(record: &R) -> Result<Vec<u8>> {
    global().structure_to_bytes(record)
}

/// [`Marshal::structure_to_bytes_into`] on the process-wide instance.
pub fn structure_to_bytes_into<R: Record>(
    record: &R,
    buffer: &mut [u8],
    start_index: usize,
) -> Result<usize> {
    global().structure_to_bytes_into(record, buffer, start_index)
}

/// Decodes with the default settings without taking the global lock.
pub fn bytes_to_structure<T: Record>(buffer: &[u8]) -> Result<T> {
    DECODER.bytes_to_structure(buffer)
}

pub fn bytes_to_structure_at<T: Record>(buffer: &[u8], start_index: usize) -> Result<T> {
    DECODER.bytes_to_structure_at(buffer, start_index)
}

/// Releases the process-wide scratch region.
pub fn release() {
    global().release();
}
