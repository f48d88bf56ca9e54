//! Per-worker reusable inflate state.
//!
//! Each worker owns exactly one [`DecoderContext`]: a raw (headerless)
//! deflate session plus a fixed 64 KiB scratch buffer, the BGZF maximum
//! uncompressed block size. The session is initialized once and reset between
//! blocks, so the steady-state loop performs no allocation at all.

use crate::block::MAX_BLOCK_SIZE;
use crate::error::{EngineError, Result};
use flate2::{Decompress, FlushDecompress, Status};

/// Opaque, resettable decompression session bound to one worker.
///
/// Never shared: exclusive ownership by a single worker loop is what lets the
/// engine skip all synchronization on decode state.
pub struct DecoderContext {
    inflater: Decompress,
    scratch: Vec<u8>,
}

impl DecoderContext {
    /// Create a session configured for raw deflate streams (the BGZF payload
    /// framing; the gzip header is parsed separately by the worker).
    pub fn new() -> Self {
        Self {
            // false = no zlib header, matching BGZF's headerless payloads
            inflater: Decompress::new(false),
            scratch: vec![0u8; MAX_BLOCK_SIZE],
        }
    }

    /// Decompress one complete block payload in a single call.
    ///
    /// The deflate stream must end within the scratch capacity; the returned
    /// slice borrows the scratch buffer and is valid until the next
    /// `inflate_block` or [`reset`](Self::reset).
    ///
    /// # Errors
    ///
    /// - [`EngineError::DecodeIncomplete`] if the stream does not report
    ///   completion (truncated input, or a block larger than the 64 KiB
    ///   format maximum).
    /// - [`EngineError::Decode`] if the payload is not valid deflate data.
    ///
    /// `block_offset` is only used for error context.
    pub fn inflate_block(&mut self, input: &[u8], block_offset: u64) -> Result<&[u8]> {
        let status = self
            .inflater
            .decompress(input, &mut self.scratch, FlushDecompress::Finish)
            .map_err(|source| EngineError::Decode {
                offset: block_offset,
                source,
            })?;

        if status != Status::StreamEnd {
            return Err(EngineError::DecodeIncomplete {
                offset: block_offset,
            });
        }

        let produced = self.bytes_produced() as usize;
        Ok(&self.scratch[..produced])
    }

    /// Bytes produced since the last reset.
    pub fn bytes_produced(&self) -> u64 {
        self.inflater.total_out()
    }

    /// Return the session to a fresh-stream state for the next block.
    ///
    /// Resets counters and stream state without reallocating.
    pub fn reset(&mut self) {
        self.inflater.reset(false);
    }
}

impl Default for DecoderContext {
    fn default() -> Self {
        Self::new()
    }
}
