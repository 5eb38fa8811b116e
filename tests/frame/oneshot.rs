// One-shot frame compression and decompression through the public API.

use zstdr::config::dstream_out_size;
use zstdr::level::max_level;
use zstdr::{
    compress, compress_bound, compress_with_policy, decompress, frame_content_size, ContentSize,
    EncodeStrategy, Error, LevelPolicy, StreamEncoder,
};

fn text(n: usize) -> Vec<u8> {
    b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. "
        .iter()
        .cycle()
        .take(n)
        .copied()
        .collect()
}

/// Frame written by the stream encoder, which never records a content size.
fn unknown_size_frame(data: &[u8]) -> Vec<u8> {
    let cfg = zstdr::CompressionConfig::new().with_strategy(EncodeStrategy::Direct);
    let mut enc = StreamEncoder::open(Vec::new(), &cfg).unwrap();
    enc.write(data).unwrap();
    enc.finish().unwrap()
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn round_trip_text() {
    let data = text(250_000);
    let frame = compress(&data, 3).unwrap();
    assert!(frame.len() < data.len() / 10);
    assert_eq!(decompress(&frame).unwrap(), data);
}

#[test]
fn empty_input_gives_valid_frame() {
    let frame = compress(&[], 3).unwrap();
    assert!(!frame.is_empty());
    assert!(frame.len() <= compress_bound(0));
    assert_eq!(frame_content_size(&frame).unwrap(), ContentSize::Known(0));
    assert!(decompress(&frame).unwrap().is_empty());
}

#[test]
fn level_zero_means_default() {
    let data = text(10_000);
    assert_eq!(compress(&data, 0).unwrap(), compress(&data, zstdr::DEFAULT_LEVEL).unwrap());
}

#[test]
fn frame_records_content_size() {
    let data = text(70_000);
    let frame = compress(&data, 1).unwrap();
    assert_eq!(frame_content_size(&frame).unwrap(), ContentSize::Known(70_000));
}

// ---------------------------------------------------------------------------
// Level boundaries
// ---------------------------------------------------------------------------

#[test]
fn max_level_succeeds_and_above_fails() {
    let data = text(1000);
    let max = max_level();
    assert_eq!(decompress(&compress(&data, max).unwrap()).unwrap(), data);
    match compress(&data, max + 1) {
        Err(Error::InvalidLevel { level, max: m, .. }) => {
            assert_eq!(level, max + 1);
            assert_eq!(m, max);
        }
        other => panic!("expected InvalidLevel, got {other:?}"),
    }
}

#[test]
fn negative_level_depends_on_policy() {
    let data = text(1000);
    assert!(matches!(
        compress_with_policy(&data, -1, LevelPolicy::Legacy),
        Err(Error::InvalidLevel { level: -1, .. })
    ));
    let frame = compress_with_policy(&data, -1, LevelPolicy::Modern).unwrap();
    assert_eq!(decompress(&frame).unwrap(), data);
}

// ---------------------------------------------------------------------------
// Unknown content size
// ---------------------------------------------------------------------------

#[test]
fn unknown_size_one_increment_plus_one_byte() {
    let data = text(dstream_out_size() + 1);
    let frame = unknown_size_frame(&data);
    assert_eq!(frame_content_size(&frame).unwrap(), ContentSize::Unknown);
    assert_eq!(decompress(&frame).unwrap(), data);
}

#[test]
fn unknown_size_many_increments() {
    let data = vec![0xA5u8; dstream_out_size() * 5 + 17];
    let frame = unknown_size_frame(&data);
    assert_eq!(decompress(&frame).unwrap(), data);
}

#[test]
fn unknown_size_truncated_frame() {
    let data = text(50_000);
    let mut frame = unknown_size_frame(&data);
    frame.truncate(frame.len() - 5);
    assert!(matches!(decompress(&frame), Err(Error::Truncated { .. })));
}

#[test]
fn concatenated_unknown_size_frames() {
    let mut frame = unknown_size_frame(b"alpha ");
    frame.extend_from_slice(&unknown_size_frame(b"beta"));
    assert_eq!(decompress(&frame).unwrap(), b"alpha beta".to_vec());
}

#[test]
fn concatenated_known_size_frames() {
    let mut frame = compress(b"alpha ", 3).unwrap().into_vec();
    frame.extend_from_slice(&compress(b"beta", 3).unwrap());
    frame.extend_from_slice(&unknown_size_frame(b" gamma"));
    assert_eq!(decompress(&frame).unwrap(), b"alpha beta gamma".to_vec());
}

// ---------------------------------------------------------------------------
// Skippable frames and malformed input
// ---------------------------------------------------------------------------

#[test]
fn many_empty_skippable_frames_before_data() {
    let empty_skip = [0x5F, 0x2A, 0x4D, 0x18, 0, 0, 0, 0];
    let mut frame: Vec<u8> = empty_skip.repeat(400_000);
    frame.extend_from_slice(&compress(b"tail", 3).unwrap());
    assert_eq!(decompress(&frame).unwrap(), b"tail".to_vec());

    let only_skips = empty_skip.repeat(400_000);
    assert!(decompress(&only_skips).unwrap().is_empty());
}

#[test]
fn skippable_frame_decodes_to_empty() {
    let mut frame = 0x184D_2A50u32.to_le_bytes().to_vec();
    frame.extend_from_slice(&3u32.to_le_bytes());
    frame.extend_from_slice(b"abc");
    assert!(decompress(&frame).unwrap().is_empty());
}

#[test]
fn skippable_frame_before_regular_frame() {
    let mut src = 0x184D_2A5Fu32.to_le_bytes().to_vec();
    src.extend_from_slice(&2u32.to_le_bytes());
    src.extend_from_slice(b"xy");
    src.extend_from_slice(&compress(b"payload", 3).unwrap());
    assert_eq!(decompress(&src).unwrap(), b"payload".to_vec());
}

#[test]
fn garbage_is_not_a_frame() {
    assert!(matches!(decompress(b"plain text"), Err(Error::NotAZstdFrame)));
    assert!(matches!(decompress(&[]), Err(Error::NotAZstdFrame)));
}

#[test]
fn oversized_declared_content_is_rejected() {
    // Single-segment frame claiming 2^40 bytes with no blocks behind it.
    let mut frame = 0xFD2F_B528u32.to_le_bytes().to_vec();
    frame.push(0xE0);
    frame.extend_from_slice(&(1u64 << 40).to_le_bytes());
    assert!(matches!(
        decompress(&frame),
        Err(Error::ContentSizeTooLarge { declared }) if declared == 1 << 40
    ));
}
