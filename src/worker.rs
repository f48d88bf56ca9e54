//! Worker loop: drain the cursor, decompress and verify each claimed block.
//!
//! Per-worker state machine:
//!
//! ```text
//! INIT -> (CLAIM -> VALIDATE -> DECODE -> VERIFY -> RESET)* -> DONE
//! ```
//!
//! Every fatal condition aborts the worker immediately; there is no retry,
//! since malformed block framing cannot be fixed by re-reading the same
//! bytes.

use crate::block::{declared_isize, BGZF_MAGIC, HEADER_SIZE, MIN_BLOCK_SIZE};
use crate::cursor::BlockCursor;
use crate::decoder::DecoderContext;
use crate::error::{EngineError, Result};
use crate::sink::BlockSink;

/// Per-worker completion counters, aggregated by the pool into a
/// [`Summary`](crate::Summary).
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct WorkerStats {
    pub blocks: u64,
    pub compressed_bytes: u64,
    pub uncompressed_bytes: u64,
}

/// Run one worker to completion.
///
/// Claims blocks from the shared cursor until EOF, feeding each through a
/// private decoder session that is reset (not reallocated) between blocks.
pub(crate) fn run<S: BlockSink>(cursor: &BlockCursor<'_>, sink: &S) -> Result<WorkerStats> {
    let mut decoder = DecoderContext::new();
    let mut stats = WorkerStats::default();
    let data = cursor.data();

    while let Some(desc) = cursor.claim_next_block()? {
        let offset = desc.offset as u64;
        let block = &data[desc.range()];

        // VALIDATE: enough room for header + trailer, then magic bytes.
        if desc.length < MIN_BLOCK_SIZE {
            return Err(EngineError::Truncated { offset });
        }
        if block[..2] != BGZF_MAGIC {
            return Err(EngineError::BadMagic {
                offset,
                found: [block[0], block[1]],
            });
        }

        // DECODE: the payload starts past the fixed header and spans
        // `length - 16` bytes, nominally reaching 2 bytes into the trailer
        // (a fixed property of the format; the deflate stream ends earlier).
        // Clamp to the buffer end so the final block cannot index past it.
        let payload_start = desc.offset + HEADER_SIZE;
        let payload_end = (payload_start + desc.length - 16).min(data.len());
        let expected = declared_isize(block);

        let produced = decoder.inflate_block(&data[payload_start..payload_end], offset)?;

        // VERIFY: the trailer's ISIZE must match what the decoder produced.
        if produced.len() as u64 != expected as u64 {
            return Err(EngineError::SizeMismatch {
                offset,
                expected,
                actual: produced.len() as u64,
            });
        }

        sink.consume(offset, produced)?;

        stats.blocks += 1;
        stats.compressed_bytes += desc.length as u64;
        stats.uncompressed_bytes += expected as u64;

        // RESET: fresh-stream state for the next block, no reallocation.
        decoder.reset();
    }

    Ok(stats)
}
