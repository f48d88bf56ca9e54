//! Shared block cursor: hands out non-overlapping block boundaries.
//!
//! The cursor is the single piece of shared mutable state in the engine. One
//! mutex covers the whole read-BSIZE-then-advance sequence, so no two callers
//! can ever receive overlapping or identical descriptors. Contention is
//! per-block (a claim reads two small integers and bumps a counter, while a
//! block takes tens of microseconds to decode), so a plain mutex is the right
//! primitive here.

use crate::block::{declared_block_length, BlockDescriptor, HEADER_SIZE};
use crate::error::{EngineError, Result};
use std::sync::Mutex;

/// Mutable scan position over a source buffer, shared by all workers.
///
/// Created at position zero, advanced only inside the locked claim operation,
/// never reset. The position is monotonically non-decreasing and always in
/// `0..=data.len()`.
pub struct BlockCursor<'a> {
    data: &'a [u8],
    position: Mutex<usize>,
}

impl<'a> BlockCursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: Mutex::new(0),
        }
    }

    /// The source bytes this cursor scans.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Claim the next block, or `Ok(None)` once the buffer is exhausted.
    ///
    /// Each non-EOF descriptor is handed out exactly once; successive claims
    /// (across any number of threads) partition the buffer with no gaps and
    /// no overlaps. Callers keep probing until they personally observe
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Truncated`] if fewer than 18 bytes remain when
    /// a header must be read, or if the declared block length overruns the
    /// buffer. Both mean the file is truncated or corrupt; the cursor never
    /// reads out of bounds.
    pub fn claim_next_block(&self) -> Result<Option<BlockDescriptor>> {
        let mut position = self.position.lock().expect("block cursor mutex poisoned");
        let offset = *position;

        if offset == self.data.len() {
            return Ok(None);
        }

        // The BSIZE field lives at +16..18; a shorter tail cannot hold a header.
        if offset + HEADER_SIZE > self.data.len() {
            return Err(EngineError::Truncated {
                offset: offset as u64,
            });
        }

        let length = declared_block_length(&self.data[offset..]);
        if offset + length > self.data.len() {
            return Err(EngineError::Truncated {
                offset: offset as u64,
            });
        }

        *position = offset + length;
        Ok(Some(BlockDescriptor { offset, length }))
    }
}
