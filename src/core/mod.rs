//! Core module: reusable staging memory
//!
//! Prinsip desain:
//! - No-Allocation: the region is reused until a request outgrows it
//! - Grow-only: capacity tracks the high-water mark, in block multiples
//! - Explicit release: memory is returned only when the owner asks

mod scratch;

pub use scratch::{ScratchBuffer, BLOCK_SIZE};
