//! bgzf-engine: concurrent block-parallel BGZF decompression
//!
//! # Overview
//!
//! A BGZF file is a sequence of self-delimiting compressed blocks, each
//! independently decompressible. This crate loads (or maps) the whole file
//! into a read-only [`SourceBuffer`], then lets a fixed pool of worker
//! threads race to claim blocks from a single mutex-guarded [`BlockCursor`]
//! and decompress them with per-worker reusable inflate state. Coordination
//! cost is one short critical section per block; everything else runs without
//! synchronization.
//!
//! # Quick Start
//!
//! ```no_run
//! use bgzf_engine::{Engine, NullSink, SourceBuffer};
//!
//! # fn main() -> bgzf_engine::Result<()> {
//! let source = SourceBuffer::from_path("alignments.bam")?;
//! let summary = Engine::new(8).run(&source, &NullSink)?;
//!
//! println!(
//!     "{} blocks, {} -> {} bytes",
//!     summary.blocks, summary.compressed_bytes, summary.uncompressed_bytes
//! );
//! # Ok(())
//! # }
//! ```
//!
//! To keep the output, supply a [`MemorySink`] (reassembles file order) or
//! implement [`BlockSink`] for a custom consumer; `(block offset, bytes)`
//! pairs arrive in whatever order workers finish.
//!
//! # Failure model
//!
//! Block framing errors are never retried: truncation, bad magic, an
//! unterminated deflate stream, or an ISIZE mismatch each abort the run as a
//! whole, reporting the error kind and the byte offset where it occurred.
//!
//! # Module Organization
//!
//! - [`source`]: file acquisition (read vs mmap by size threshold)
//! - [`block`]: wire-format constants and block descriptors
//! - [`cursor`]: the shared claim cursor
//! - [`decoder`]: per-worker resettable inflate sessions
//! - [`engine`]: worker pool and run orchestration
//! - [`sink`]: output destinations for decompressed blocks
//! - [`encode`]: the matching block encoder

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod block;
pub mod cursor;
pub mod decoder;
pub mod encode;
pub mod engine;
pub mod error;
pub mod sink;
pub mod source;

mod worker;

pub use block::{BlockDescriptor, MAX_BLOCK_SIZE};
pub use cursor::BlockCursor;
pub use decoder::DecoderContext;
pub use encode::{encode, encode_block, EOF_BLOCK};
pub use engine::{decompress_parallel, Engine, Summary};
pub use error::{EngineError, Result};
pub use sink::{BlockSink, MemorySink, NullSink};
pub use source::{SourceBuffer, MMAP_THRESHOLD};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
