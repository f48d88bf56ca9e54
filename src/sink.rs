//! Output destinations for decompressed blocks.
//!
//! Workers finish blocks in an arbitrary interleaving, so a sink receives
//! `(block offset, bytes)` pairs rather than an ordered stream. The offset is
//! enough to reassemble file order when a consumer wants it.

use crate::error::Result;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Capability accepting decompressed blocks.
///
/// Implementations are shared by all workers concurrently, hence the `Sync`
/// bound and the `&self` receiver.
pub trait BlockSink: Sync {
    /// Accept one decompressed block.
    ///
    /// `offset` is the byte offset of the *compressed* block within the
    /// source buffer; `data` is its full uncompressed content (empty for the
    /// BGZF EOF block).
    fn consume(&self, offset: u64, data: &[u8]) -> Result<()>;
}

/// Sink that discards everything.
///
/// The benchmark-core behavior: blocks are decompressed and verified, then
/// dropped.
#[derive(Debug, Default)]
pub struct NullSink;

impl BlockSink for NullSink {
    fn consume(&self, _offset: u64, _data: &[u8]) -> Result<()> {
        Ok(())
    }
}

/// Sink that reassembles blocks in file order.
///
/// Blocks arrive in arbitrary order; keying by compressed offset restores
/// file order because block offsets are strictly increasing in the source.
#[derive(Debug, Default)]
pub struct MemorySink {
    blocks: Mutex<BTreeMap<u64, Vec<u8>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenate all received blocks in file order.
    pub fn into_bytes(self) -> Vec<u8> {
        let blocks = self
            .blocks
            .into_inner()
            .expect("memory sink mutex poisoned");
        let total: usize = blocks.values().map(Vec::len).sum();
        let mut out = Vec::with_capacity(total);
        for data in blocks.into_values() {
            out.extend_from_slice(&data);
        }
        out
    }

    /// Number of blocks received so far.
    pub fn block_count(&self) -> usize {
        self.blocks.lock().expect("memory sink mutex poisoned").len()
    }
}

impl BlockSink for MemorySink {
    fn consume(&self, offset: u64, data: &[u8]) -> Result<()> {
        self.blocks
            .lock()
            .expect("memory sink mutex poisoned")
            .insert(offset, data.to_vec());
        Ok(())
    }
}
