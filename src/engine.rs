//! Worker pool orchestration.
//!
//! The pool owns a fixed number of OS threads, all racing a single shared
//! [`BlockCursor`]. There is no task queue beyond the cursor itself and no
//! cross-worker dependency: blocks are independent, so no worker ever blocks
//! on another worker's decode.

use crate::cursor::BlockCursor;
use crate::error::{EngineError, Result};
use crate::sink::{BlockSink, MemorySink};
use crate::worker::{self, WorkerStats};

/// Aggregate completion report for a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Blocks decoded across all workers (including the empty EOF block)
    pub blocks: u64,
    /// Compressed bytes consumed; equals the source length on success
    pub compressed_bytes: u64,
    /// Uncompressed bytes produced and verified
    pub uncompressed_bytes: u64,
}

/// Fixed-size pool of decompression workers.
///
/// # Example
///
/// ```
/// use bgzf_engine::{encode, Engine, NullSink};
///
/// # fn main() -> bgzf_engine::Result<()> {
/// let data = encode(b"some genomic records")?;
/// let summary = Engine::new(4).run(&data, &NullSink)?;
/// assert_eq!(summary.uncompressed_bytes, 20);
/// # Ok(())
/// # }
/// ```
pub struct Engine {
    workers: usize,
}

impl Engine {
    /// Create an engine with the given worker count.
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    /// Decompress every block of `data`, blocking until all workers are done.
    ///
    /// Workers claim blocks from one shared cursor and hand verified output
    /// to `sink` in an arbitrary interleaving. Any worker's fatal error fails
    /// the run as a whole: there is no partial-success mode, since corruption
    /// anywhere means the file's block framing cannot be trusted. Remaining
    /// workers still drain to EOF before the error is returned (no
    /// cancellation of in-flight decodes).
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidWorkerCount`] for a zero worker count, otherwise
    /// the first block-level error any worker hit.
    pub fn run<S: BlockSink>(&self, data: &[u8], sink: &S) -> Result<Summary> {
        if self.workers == 0 {
            return Err(EngineError::InvalidWorkerCount);
        }

        let cursor = BlockCursor::new(data);

        let results: Vec<Result<WorkerStats>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..self.workers)
                .map(|_| scope.spawn(|| worker::run(&cursor, sink)))
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        let mut summary = Summary::default();
        for result in results {
            let stats = result?;
            summary.blocks += stats.blocks;
            summary.compressed_bytes += stats.compressed_bytes;
            summary.uncompressed_bytes += stats.uncompressed_bytes;
        }
        Ok(summary)
    }
}

/// Decompress a whole BGZF buffer to memory using `workers` threads.
///
/// Convenience wrapper over [`Engine::run`] with a [`MemorySink`]; output is
/// in file order regardless of the decode interleaving.
///
/// # Example
///
/// ```
/// use bgzf_engine::{decompress_parallel, encode};
///
/// # fn main() -> bgzf_engine::Result<()> {
/// let compressed = encode(b"ACGTACGT")?;
/// let restored = decompress_parallel(&compressed, 8)?;
/// assert_eq!(restored, b"ACGTACGT");
/// # Ok(())
/// # }
/// ```
pub fn decompress_parallel(data: &[u8], workers: usize) -> Result<Vec<u8>> {
    let sink = MemorySink::new();
    Engine::new(workers).run(data, &sink)?;
    Ok(sink.into_bytes())
}
