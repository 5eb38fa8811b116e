#![no_main]
use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(mut dec) =
        zstdr::StreamDecoder::open(Cursor::new(data), &zstdr::DecompressionConfig::new())
    else {
        return;
    };
    let mut buf = [0u8; 4096];
    let mut total = 0usize;
    while let Ok(n) = dec.read_into(&mut buf) {
        if n == 0 || total > 64 << 20 {
            break;
        }
        total += n;
    }
});
