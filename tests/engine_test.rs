//! Integration tests for the block-parallel decompression engine.
//!
//! Covers the engine's end-to-end guarantees:
//! - claim partitioning and EOF behavior at several worker counts
//! - parallel output equals sequential gzip decompression
//! - corruption fixtures (magic, ISIZE, truncation) fail with the right
//!   error kind and offset, never a crash or silent truncation
//! - file-backed sources behave like in-memory ones

use bgzf_engine::{
    decompress_parallel, encode, encode_block, BlockCursor, Engine, EngineError, MemorySink,
    NullSink, SourceBuffer, EOF_BLOCK,
};
use flate2::read::MultiGzDecoder;
use std::io::{Read, Write};
use tempfile::NamedTempFile;

/// Deterministic pseudo-random payload large enough to span many blocks.
fn test_payload(len: usize) -> Vec<u8> {
    let mut state = 0x2545F4914F6CDD1Du64;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 32) as u8
        })
        .collect()
}

#[test]
fn test_parallel_matches_sequential_gzip() {
    let payload = test_payload(500_000);
    let compressed = encode(&payload).unwrap();

    // Sequential oracle: flate2's multi-member gzip decoder
    let mut sequential = Vec::new();
    MultiGzDecoder::new(&compressed[..])
        .read_to_end(&mut sequential)
        .unwrap();
    assert_eq!(sequential, payload);

    for workers in [1, 2, 8] {
        let parallel = decompress_parallel(&compressed, workers).unwrap();
        assert_eq!(parallel, sequential, "mismatch with {workers} workers");
    }
}

#[test]
fn test_decode_encode_decode_is_idempotent() {
    let payload = test_payload(100_000);
    let compressed = encode(&payload).unwrap();

    let first = decompress_parallel(&compressed, 4).unwrap();
    let reencoded = encode(&first).unwrap();
    let second = decompress_parallel(&reencoded, 4).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_three_block_claim_scenario() {
    // Synthetic framing-only blocks of declared lengths 30, 45, 20
    // (BSIZE fields 29, 44, 19); the cursor must claim exactly
    // (0,30), (30,45), (75,20) then EOF, regardless of worker count.
    let mut data = Vec::new();
    for len in [30usize, 45, 20] {
        let mut block = vec![0u8; len];
        block[16..18].copy_from_slice(&((len - 1) as u16).to_le_bytes());
        data.extend_from_slice(&block);
    }

    for workers in [1, 2, 8] {
        let cursor = BlockCursor::new(&data);
        let claimed = std::sync::Mutex::new(Vec::new());

        std::thread::scope(|s| {
            for _ in 0..workers {
                s.spawn(|| {
                    while let Some(desc) = cursor.claim_next_block().unwrap() {
                        claimed.lock().unwrap().push((desc.offset, desc.length));
                    }
                    // This prober has personally observed EOF; it must stay EOF.
                    assert!(cursor.claim_next_block().unwrap().is_none());
                });
            }
        });

        let mut claimed = claimed.into_inner().unwrap();
        claimed.sort();
        assert_eq!(
            claimed,
            vec![(0, 30), (30, 45), (75, 20)],
            "wrong claims with {workers} workers"
        );
    }
}

#[test]
fn test_isize_off_by_one_is_size_mismatch() {
    let mut block = encode_block(b"twenty bytes of data").unwrap();
    let n = block.len();
    let true_isize = u32::from_le_bytes(block[n - 4..].try_into().unwrap());
    block[n - 4..].copy_from_slice(&(true_isize + 1).to_le_bytes());

    let err = Engine::new(2).run(&block, &NullSink).unwrap_err();
    match err {
        EngineError::SizeMismatch {
            offset,
            expected,
            actual,
        } => {
            assert_eq!(offset, 0);
            assert_eq!(expected, true_isize + 1);
            assert_eq!(actual, true_isize as u64);
        }
        other => panic!("expected SizeMismatch, got {other}"),
    }
}

#[test]
fn test_untouched_isize_raises_no_size_mismatch() {
    // SizeMismatch fires iff the trailer is corrupted
    let block = encode_block(b"twenty bytes of data").unwrap();
    assert!(Engine::new(2).run(&block, &NullSink).is_ok());
}

#[test]
fn test_altered_magic_is_bad_magic() {
    let good = encode_block(b"magic test").unwrap();
    assert!(Engine::new(1).run(&good, &NullSink).is_ok());

    for (index, value) in [(0usize, 0x1Eu8), (1, 0x8C)] {
        let mut bad = good.clone();
        bad[index] = value;
        let err = Engine::new(1).run(&bad, &NullSink).unwrap_err();
        assert!(
            matches!(err, EngineError::BadMagic { offset: 0, .. }),
            "byte {index}: expected BadMagic, got {err}"
        );
    }
}

#[test]
fn test_mid_block_truncation_is_truncated_not_oob() {
    let block = encode_block(b"this block will be cut short").unwrap();

    // Length field claims more bytes than remain in the buffer
    let cut = &block[..block.len() - 5];
    let err = Engine::new(2).run(cut, &NullSink).unwrap_err();
    assert!(matches!(err, EngineError::Truncated { offset: 0 }));

    // Tail too short to even hold a header
    let err = Engine::new(2).run(&block[..10], &NullSink).unwrap_err();
    assert!(matches!(err, EngineError::Truncated { offset: 0 }));
}

#[test]
fn test_error_in_one_block_fails_whole_run() {
    let payload = test_payload(300_000);
    let mut data = encode(&payload).unwrap();

    // Corrupt the magic of the block that starts right after the first one
    let first_len = u16::from_le_bytes([data[16], data[17]]) as usize + 1;
    data[first_len] = 0;

    for workers in [1, 4] {
        let err = Engine::new(workers).run(&data, &NullSink).unwrap_err();
        assert!(
            matches!(err, EngineError::BadMagic { offset, .. } if offset == first_len as u64),
            "workers={workers}: got {err}"
        );
    }
}

#[test]
fn test_memory_sink_restores_file_order() {
    let payload = test_payload(400_000);
    let compressed = encode(&payload).unwrap();

    let sink = MemorySink::new();
    let summary = Engine::new(8).run(&compressed, &sink).unwrap();

    // 60 KiB chunking: ceil(400000 / 61440) data blocks plus the EOF block
    assert_eq!(summary.blocks, 8);
    assert_eq!(sink.into_bytes(), payload);
}

#[test]
fn test_file_backed_source_round_trip() {
    let payload = test_payload(200_000);
    let compressed = encode(&payload).unwrap();

    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(&compressed).unwrap();
    temp.flush().unwrap();

    let source = SourceBuffer::from_path(temp.path()).unwrap();
    assert_eq!(source.len(), compressed.len());

    let sink = MemorySink::new();
    Engine::new(4).run(&source, &sink).unwrap();
    assert_eq!(sink.into_bytes(), payload);
}

#[test]
fn test_eof_block_alone_decodes_to_nothing() {
    let summary = Engine::new(2).run(&EOF_BLOCK, &NullSink).unwrap();
    assert_eq!(summary.blocks, 1);
    assert_eq!(summary.compressed_bytes, EOF_BLOCK.len() as u64);
    assert_eq!(summary.uncompressed_bytes, 0);
}
