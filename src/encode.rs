//! BGZF block encoding.
//!
//! The engine only decodes, but tests and round-trip checks need an
//! equivalent encoder, and writing fixtures is useful to downstream users.
//! Each block is a complete gzip member carrying the BC extra subfield with
//! its own total length, so the result is readable by any gzip tool and
//! claimable by [`BlockCursor`](crate::BlockCursor).

use crate::block::MAX_BLOCK_SIZE;
use crate::error::{EngineError, Result};
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::Write;

/// Uncompressed payload size per block when chunking with [`encode`]
///
/// 60 KiB leaves headroom for incompressible data so the compressed block
/// still fits the u16 BSIZE field.
pub const BLOCK_PAYLOAD_SIZE: usize = 60 * 1024;

/// The canonical 28-byte empty block that terminates a BGZF file.
pub const EOF_BLOCK: [u8; 28] = [
    31, 139, 8, 4, 0, 0, 0, 0, 0, 255, // gzip header
    6, 0, 66, 67, 2, 0, 27, 0, // BC subfield, BSIZE=27
    3, 0, // empty deflate stream
    0, 0, 0, 0, // CRC32
    0, 0, 0, 0, // ISIZE
];

/// Compress `data` into a single complete BGZF block.
///
/// Layout: 18-byte header (gzip magic, FEXTRA flag, BC subfield holding
/// BSIZE), raw deflate payload, CRC32 of the uncompressed data, ISIZE.
/// BSIZE is patched in once the total size is known.
///
/// # Errors
///
/// Returns [`EngineError::Compression`] if `data` exceeds the 64 KiB format
/// maximum or if the compressed block does not fit the u16 BSIZE field.
pub fn encode_block(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() > MAX_BLOCK_SIZE {
        return Err(EngineError::Compression(format!(
            "block payload of {} bytes exceeds the {} byte format maximum",
            data.len(),
            MAX_BLOCK_SIZE
        )));
    }

    let mut deflater = DeflateEncoder::new(Vec::new(), Compression::default());
    deflater.write_all(data)?;
    let deflated = deflater.finish()?;

    let crc = crc32fast::hash(data);

    let mut block = Vec::with_capacity(deflated.len() + 26);
    block.push(31); // ID1
    block.push(139); // ID2
    block.push(8); // CM (deflate)
    block.push(4); // FLG (FEXTRA)
    block.extend_from_slice(&[0, 0, 0, 0]); // MTIME
    block.push(0); // XFL
    block.push(255); // OS (unknown)
    block.extend_from_slice(&6u16.to_le_bytes()); // XLEN
    block.push(66); // SI1='B'
    block.push(67); // SI2='C'
    block.extend_from_slice(&2u16.to_le_bytes()); // SLEN

    let bsize_pos = block.len();
    block.extend_from_slice(&0u16.to_le_bytes()); // BSIZE, patched below

    block.extend_from_slice(&deflated);
    block.extend_from_slice(&crc.to_le_bytes());
    block.extend_from_slice(&(data.len() as u32).to_le_bytes());

    let total = block.len();
    if total > u16::MAX as usize + 1 {
        return Err(EngineError::Compression(format!(
            "compressed block of {total} bytes does not fit the BSIZE field"
        )));
    }
    let bsize = (total - 1) as u16;
    block[bsize_pos..bsize_pos + 2].copy_from_slice(&bsize.to_le_bytes());

    Ok(block)
}

/// Compress a whole buffer into a BGZF member sequence.
///
/// Chunks input at [`BLOCK_PAYLOAD_SIZE`] and appends the [`EOF_BLOCK`]
/// terminator, matching what bgzip-family tools emit.
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for chunk in data.chunks(BLOCK_PAYLOAD_SIZE) {
        out.extend_from_slice(&encode_block(chunk)?);
    }
    out.extend_from_slice(&EOF_BLOCK);
    Ok(out)
}
