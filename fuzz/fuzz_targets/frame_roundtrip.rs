#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the level, the rest is the payload.
    let Some((&selector, payload)) = data.split_first() else {
        return;
    };
    let level = i32::from(selector % 23) - 3;

    let frame = zstdr::compress(payload, level).expect("compression of valid input failed");
    let back = zstdr::decompress(&frame).expect("own frame did not decode");
    assert_eq!(back.as_slice(), payload, "round trip mismatch at level {level}");
});
