//! Reusable staging region for the structure marshal.
//!
//! Region dialokasikan sekali dan dipakai ulang; tidak ada alokasi di hot
//! path selama request tidak melebihi kapasitas.
//!
//! Lifecycle: `Uninitialized -> Sized(capacity)`. Capacity only grows, in
//! multiples of the block size, until [`ScratchBuffer::release`] drops the
//! region again.

use log::debug;

use crate::error::{Error, Result};

/// Default allocation granularity in bytes.
pub const BLOCK_SIZE: usize = 2048;

/// Growable byte region that never shrinks on its own.
#[derive(Debug)]
pub struct ScratchBuffer {
    region: Option<Box<[u8]>>,
    block_size: usize,
}

impl Default for ScratchBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScratchBuffer {
    /// Membuat scratch buffer kosong. Tidak ada alokasi sampai request pertama.
    pub const fn new() -> Self {
        Self::with_block_size(BLOCK_SIZE)
    }

    /// Uses `block_size` as the rounding granularity. A zero block size is
    /// treated as 1.
    pub const fn with_block_size(block_size: usize) -> Self {
        Self {
            region: None,
            block_size: if block_size == 0 { 1 } else { block_size },
        }
    }

    /// Current capacity in bytes, 0 when uninitialized.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.region.as_ref().map_or(0, |region| region.len())
    }

    #[inline(always)]
    pub fn is_allocated(&self) -> bool {
        self.region.is_some()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Makes room for at least `size` bytes.
    ///
    /// When the region is missing or too small it is dropped and replaced by
    /// one of `ceil(size / block_size) * block_size` bytes. Otherwise this is a
    /// no-op. A request for 0 bytes on an uninitialized buffer allocates
    /// nothing. A request whose rounded size overflows `usize` is an
    /// `InvalidArgument` and leaves the region as it was.
    pub fn ensure_capacity(&mut self, size: usize) -> Result<()> {
        let capacity = self.capacity();
        if self.region.is_some() && capacity >= size {
            return Ok(());
        }
        let rounded = size
            .div_ceil(self.block_size)
            .checked_mul(self.block_size)
            .ok_or_else(|| {
                Error::invalid(format_args!(
                    "scratch request of {size} bytes overflows when rounded to {}-byte blocks",
                    self.block_size
                ))
            })?;
        if rounded == 0 {
            return Ok(());
        }

        // Drop the old region first; both are never alive at once.
        self.region = None;
        self.region = Some(vec![0u8; rounded].into_boxed_slice());
        debug!("scratch buffer grown from {capacity} to {rounded} bytes (request {size})");
        Ok(())
    }

    /// Drops the region and resets capacity to 0. No-op when uninitialized.
    pub fn release(&mut self) {
        if let Some(region) = self.region.take() {
            debug!("scratch buffer released ({} bytes)", region.len());
        }
    }

    /// Ensures capacity for `len` bytes and returns exactly that prefix.
    #[inline(always)]
    pub fn region_mut(&mut self, len: usize) -> Result<&mut [u8]> {
        self.ensure_capacity(len)?;
        Ok(match self.region.as_deref_mut() {
            Some(region) => &mut region[..len],
            None => Default::default(),
        })
    }
}
