//! Error types for bgzf-engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Error types that can occur while claiming or decompressing blocks
///
/// Every block-level variant carries the byte offset of the block at which
/// the failure was detected. None of these conditions are recoverable:
/// malformed block framing cannot be fixed by re-reading the same bytes, so
/// a single failure fails the whole run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A block header or block body extends past the end of the source buffer
    #[error("truncated input: block at offset {offset} extends past end of buffer")]
    Truncated {
        /// Byte offset of the block whose framing overran the buffer
        offset: u64,
    },

    /// Block header magic bytes don't match the BGZF magic (0x1F 0x8B)
    #[error("bad magic at offset {offset}: expected [31, 139], got [{}, {}]", found[0], found[1])]
    BadMagic {
        /// Byte offset of the offending block
        offset: u64,
        /// The two bytes actually found at the block start
        found: [u8; 2],
    },

    /// The decoder did not reach end-of-stream within the 64 KiB scratch
    /// capacity: either truncated compressed data or a block exceeding the
    /// format's maximum uncompressed size
    #[error("incomplete decode at offset {offset}: deflate stream did not end within block")]
    DecodeIncomplete {
        /// Byte offset of the offending block
        offset: u64,
    },

    /// The compressed payload itself is invalid deflate data
    #[error("corrupt deflate stream at offset {offset}: {source}")]
    Decode {
        /// Byte offset of the offending block
        offset: u64,
        /// Underlying flate2 error
        source: flate2::DecompressError,
    },

    /// Decompressed byte count differs from the trailer's declared ISIZE
    #[error("size mismatch at offset {offset}: trailer declares {expected} bytes, decoder produced {actual}")]
    SizeMismatch {
        /// Byte offset of the offending block
        offset: u64,
        /// ISIZE value from the block trailer
        expected: u32,
        /// Bytes actually produced by the decoder
        actual: u64,
    },

    /// Worker count of zero was requested
    #[error("worker count must be at least 1")]
    InvalidWorkerCount,

    /// Compression error (encoder side)
    #[error("compression error: {0}")]
    Compression(String),
}
