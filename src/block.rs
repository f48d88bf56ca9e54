//! BGZF block wire format: constants, descriptors, and field readers.
//!
//! A BGZF file is a sequence of self-delimiting gzip members ("blocks"), each
//! independently decompressible. All integers are little-endian.
//!
//! # Block layout
//!
//! | Offset (from block start) | Field | Width |
//! |---|---|---|
//! | 0 | magic byte 1 (0x1F) | 1 |
//! | 1 | magic byte 2 (0x8B) | 1 |
//! | 16 | BSIZE (total block length − 1) | 2 |
//! | 18 | compressed payload | `length − 16` bytes |
//! | `length − 8` | CRC32 of uncompressed data | 4 |
//! | `length − 4` | ISIZE (uncompressed size) | 4 |
//!
//! The payload span of `length − 16` bytes starting at +18 nominally extends
//! two bytes past the declared block end (`18 + (length − 16) == length + 2`).
//! This overlap with the trailer region is a fixed property of the format:
//! the 2-byte BSIZE field sits inside the fixed header, and the deflate
//! stream itself always terminates before the CRC32/ISIZE trailer.

/// BGZF magic bytes (shared with gzip: ID1=31, ID2=139)
pub const BGZF_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Fixed BGZF header size: 10-byte gzip header, 2-byte XLEN, 6-byte BC subfield
pub const HEADER_SIZE: usize = 18;

/// Offset of the 2-byte BSIZE field within a block
pub const BSIZE_OFFSET: usize = 16;

/// Smallest well-formed block: 18-byte header, 2-byte empty deflate stream,
/// 8-byte trailer
pub const MIN_BLOCK_SIZE: usize = 28;

/// Maximum uncompressed size of a single block, per the BGZF specification
///
/// Because BSIZE is `u16` and counts `length − 1`, no block can declare more
/// than 65536 total bytes, and the format guarantees each block decompresses
/// to at most 64 KiB. This bounds the per-worker scratch buffer.
pub const MAX_BLOCK_SIZE: usize = 65536;

/// A claimed block: a non-owning `(offset, length)` view into the source
/// buffer.
///
/// Produced by [`BlockCursor::claim_next_block`](crate::BlockCursor::claim_next_block)
/// and consumed by exactly one worker. The cursor guarantees the descriptor
/// lies fully inside the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDescriptor {
    /// Byte offset of the block start within the source buffer
    pub offset: usize,
    /// Total block length in bytes (BSIZE + 1)
    pub length: usize,
}

impl BlockDescriptor {
    /// Byte range covered by this block
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.length
    }
}

/// Read the u16 LE BSIZE field of the block starting at `block[BSIZE_OFFSET]`
/// and return the total block length it declares.
///
/// The caller must have verified `block.len() >= HEADER_SIZE`.
pub(crate) fn declared_block_length(block: &[u8]) -> usize {
    let bsize = u16::from_le_bytes([block[BSIZE_OFFSET], block[BSIZE_OFFSET + 1]]);
    bsize as usize + 1
}

/// Read the u32 LE ISIZE field from the last four bytes of a block.
///
/// The caller must have verified `block.len() >= MIN_BLOCK_SIZE`.
pub(crate) fn declared_isize(block: &[u8]) -> u32 {
    let tail = &block[block.len() - 4..];
    u32::from_le_bytes([tail[0], tail[1], tail[2], tail[3]])
}
