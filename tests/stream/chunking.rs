// Chunk-size invariance: how input is split across writes and how output
// is requested from reads must not change the decoded bytes.

use std::io::{Cursor, Read};

use proptest::prelude::*;
use zstdr::{
    decompress, CompressionConfig, DecompressionConfig, EncodeStrategy, StreamDecoder,
    StreamEncoder,
};

fn encode_chunked(data: &[u8], chunks: &[usize], strategy: EncodeStrategy) -> Vec<u8> {
    let cfg = CompressionConfig::new().with_level(1).with_strategy(strategy);
    let mut enc = StreamEncoder::open(Vec::new(), &cfg).unwrap();
    let mut rest = data;
    let mut sizes = chunks.iter().cycle();
    while !rest.is_empty() {
        let n = (*sizes.next().unwrap()).min(rest.len());
        assert_eq!(enc.write(&rest[..n]).unwrap(), n);
        rest = &rest[n..];
    }
    enc.finish().unwrap()
}

fn decode_chunked(frame: Vec<u8>, read_size: usize) -> Vec<u8> {
    let mut dec = StreamDecoder::open(Cursor::new(frame), &DecompressionConfig::new()).unwrap();
    let mut out = Vec::new();
    loop {
        let piece = dec.read(read_size).unwrap();
        if piece.is_empty() {
            break;
        }
        out.extend_from_slice(&piece);
    }
    assert!(dec.is_frame_complete());
    out
}

fn strategy() -> impl Strategy<Value = EncodeStrategy> {
    prop_oneof![Just(EncodeStrategy::Direct), Just(EncodeStrategy::Staged)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn any_write_split_decodes_one_shot(
        data in proptest::collection::vec(any::<u8>(), 0..40_000),
        chunks in proptest::collection::vec(1usize..5_000, 1..8),
        strategy in strategy(),
    ) {
        let frame = encode_chunked(&data, &chunks, strategy);
        prop_assert_eq!(decompress(&frame).unwrap().into_vec(), data);
    }

    #[test]
    fn any_read_size_decodes_streaming(
        data in proptest::collection::vec(0u8..4, 0..60_000),
        read_size in 1usize..10_000,
        strategy in strategy(),
    ) {
        let frame = encode_chunked(&data, &[7_777], strategy);
        prop_assert_eq!(decode_chunked(frame, read_size), data);
    }
}

#[test]
fn strategies_agree_on_content() {
    let data: Vec<u8> = (0..300_000u32).map(|i| (i % 251) as u8).collect();
    let direct = encode_chunked(&data, &[1, 10, 100, 1000, 10_000], EncodeStrategy::Direct);
    let staged = encode_chunked(&data, &[1, 10, 100, 1000, 10_000], EncodeStrategy::Staged);
    assert_eq!(decompress(&direct).unwrap(), data);
    assert_eq!(decompress(&staged).unwrap(), data);
}

#[test]
fn std_read_to_end() {
    let data = b"read through the std trait ".repeat(5_000);
    let frame = encode_chunked(&data, &[4096], EncodeStrategy::Direct);
    let mut dec = StreamDecoder::open(Cursor::new(frame), &DecompressionConfig::new()).unwrap();
    let mut out = Vec::new();
    dec.read_to_end(&mut out).unwrap();
    assert_eq!(out, data);
}
