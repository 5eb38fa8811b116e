#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are expected; panics and runaway allocation are not.
    let _ = zstdr::frame::FrameHeader::parse(data);
    let _ = zstdr::frame::scan_frames(data);
    let _ = zstdr::decompress(data);
});
