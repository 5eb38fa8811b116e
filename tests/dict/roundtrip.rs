// Dictionary compression round trips, one-shot and reused.

use std::sync::Arc;
use std::thread;

use proptest::prelude::*;
use zstdr::{
    compress_using_cdict, compress_with_dictionary, decompress_using_ddict,
    decompress_with_dictionary, CompressionDictionary, CompressionLevel, DecompressionDictionary,
    Error, LevelPolicy,
};

const DICT: &[u8] = b"{\"user\":\"\",\"email\":\"@example.com\",\"active\":true,\"roles\":[\"admin\",\"viewer\"]}";

fn record(i: usize) -> Vec<u8> {
    format!(
        "{{\"user\":\"user{i}\",\"email\":\"user{i}@example.com\",\"active\":true,\"roles\":[\"viewer\"]}}"
    )
    .into_bytes()
}

#[test]
fn small_records_shrink_with_dictionary() {
    let input = record(7);
    let with = compress_with_dictionary(&input, DICT, 3).unwrap();
    let without = zstdr::compress(&input, 3).unwrap();
    assert!(with.len() < without.len(), "{} vs {}", with.len(), without.len());
    assert_eq!(decompress_with_dictionary(&with, DICT).unwrap(), input);
}

#[test]
fn digested_dictionaries_shared_across_threads() {
    let level = CompressionLevel::new(5, LevelPolicy::Modern).unwrap();
    let cdict = Arc::new(CompressionDictionary::new(DICT, level).unwrap());
    let ddict = Arc::new(DecompressionDictionary::new(DICT).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let (cdict, ddict) = (Arc::clone(&cdict), Arc::clone(&ddict));
            thread::spawn(move || {
                for i in 0..25 {
                    let input = record(t * 100 + i);
                    let frame = compress_using_cdict(&input, &cdict).unwrap();
                    assert_eq!(decompress_using_ddict(&frame, &ddict).unwrap(), input);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn empty_input_with_dictionary() {
    let frame = compress_with_dictionary(&[], DICT, 3).unwrap();
    assert!(decompress_with_dictionary(&frame, DICT).unwrap().is_empty());
}

#[test]
fn invalid_level_checked_first() {
    assert!(matches!(
        compress_with_dictionary(b"abc", DICT, 1000),
        Err(Error::InvalidLevel { level: 1000, .. })
    ));
}

#[test]
fn dictionary_decode_needs_declared_size() {
    let frame = zstdr::copy_encode(&record(1)[..], Vec::new(), &zstdr::CompressionConfig::new())
        .unwrap()
        .1;
    assert!(matches!(
        decompress_with_dictionary(&frame, DICT),
        Err(Error::UnknownDecompressedSize)
    ));
}

proptest! {
    #[test]
    fn round_trip_any_dictionary(
        data in proptest::collection::vec(any::<u8>(), 0..4096),
        dict in proptest::collection::vec(any::<u8>(), 8..2048),
        level in 1i32..=12,
    ) {
        let frame = compress_with_dictionary(&data, &dict, level).unwrap();
        prop_assert_eq!(decompress_with_dictionary(&frame, &dict).unwrap().into_vec(), data);
    }
}
