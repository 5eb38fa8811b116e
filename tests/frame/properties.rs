// Property tests for the one-shot codec.

use proptest::prelude::*;
use zstdr::level::max_level;
use zstdr::{compress, compress_with_policy, decompress, LevelPolicy};

fn reference_frame() -> (Vec<u8>, Vec<u8>) {
    let data: Vec<u8> = b"header corruption probe ".iter().cycle().take(4000).copied().collect();
    let frame = compress(&data, 3).unwrap().into_vec();
    (data, frame)
}

proptest! {
    #[test]
    fn round_trip(data in proptest::collection::vec(any::<u8>(), 0..20_000), level in 1i32..=9) {
        let frame = compress(&data, level).unwrap();
        prop_assert_eq!(decompress(&frame).unwrap().into_vec(), data);
    }

    #[test]
    fn round_trip_fast_levels(data in proptest::collection::vec(any::<u8>(), 0..4096), level in -5i32..0) {
        let frame = compress_with_policy(&data, level, LevelPolicy::Modern).unwrap();
        prop_assert_eq!(decompress(&frame).unwrap().into_vec(), data);
    }

    #[test]
    fn levels_above_max_fail(extra in 1i32..100) {
        prop_assert!(compress(b"x", max_level() + extra).is_err());
    }
}

#[test]
fn header_byte_flips_never_yield_wrong_content() {
    let (data, frame) = reference_frame();
    let header_len = zstdr::frame::header_size(&frame).unwrap();
    for pos in 0..header_len {
        for mask in [0x01u8, 0x02, 0x10, 0x40, 0x80, 0xFF] {
            let mut bad = frame.clone();
            bad[pos] ^= mask;
            if let Ok(out) = decompress(&bad) {
                assert_eq!(out.as_slice(), &data[..], "flip {mask:#x} at {pos} decoded wrongly");
            }
        }
    }
}
