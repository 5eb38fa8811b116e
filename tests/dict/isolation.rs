// Frames made with one dictionary must not decode silently with another.

use zstdr::{
    compress_with_dictionary, decompress_with_dictionary, dictionary_id, DecompressionDictionary,
    Error,
};

fn dict_a() -> Vec<u8> {
    b"alpha bravo charlie delta echo foxtrot golf hotel india juliet ".repeat(16)
}

fn dict_b() -> Vec<u8> {
    b"kilo lima mike november oscar papa quebec romeo sierra tango ".repeat(16)
}

fn input() -> Vec<u8> {
    b"alpha bravo charlie delta echo foxtrot golf hotel india juliet!".to_vec()
}

#[test]
fn different_dictionaries_give_different_frames() {
    let a = compress_with_dictionary(&input(), &dict_a(), 3).unwrap();
    let b = compress_with_dictionary(&input(), &dict_b(), 3).unwrap();
    assert_ne!(a, b);
}

#[test]
fn wrong_dictionary_is_detected() {
    let data = input();
    let frame = compress_with_dictionary(&data, &dict_a(), 3).unwrap();
    match decompress_with_dictionary(&frame, &dict_b()) {
        Ok(out) => assert_eq!(out.as_slice(), &data[..]),
        Err(e) => assert!(
            matches!(e, Error::Transform { .. } | Error::SizeMismatch { .. }),
            "unexpected error {e:?}"
        ),
    }
}

#[test]
fn missing_dictionary_is_detected() {
    let data = input();
    let frame = compress_with_dictionary(&data, &dict_a(), 3).unwrap();
    match zstdr::decompress(&frame) {
        Ok(out) => assert_eq!(out.as_slice(), &data[..]),
        Err(e) => assert!(matches!(e, Error::Transform { .. } | Error::SizeMismatch { .. })),
    }
}

#[test]
fn structured_dictionary_id() {
    let mut dict = 0xEC30_A437u32.to_le_bytes().to_vec();
    dict.extend_from_slice(&0x1234_5678u32.to_le_bytes());
    assert_eq!(dictionary_id(&dict), 0x1234_5678);
    assert_eq!(dictionary_id(&dict_a()), 0);
    // Header alone is not a usable dictionary.
    assert!(matches!(
        DecompressionDictionary::new(&dict),
        Err(Error::DictionaryBuildFailed)
    ));
}

#[test]
fn context_outlives_callers_dictionary_handle() {
    use std::sync::Arc;
    use zstdr::{compress_bound, CompressionContext, CompressionDictionary, CompressionLevel};

    let level = CompressionLevel::default();
    let mut ctx = CompressionContext::create().unwrap();
    {
        let cdict = Arc::new(CompressionDictionary::new(&dict_a(), level).unwrap());
        ctx.begin_stream(level, Some(cdict)).unwrap();
    }
    let _reuse_freed: Vec<Vec<u8>> = (0..256).map(|i| vec![i as u8; 1024]).collect();

    let data = input();
    let mut out = vec![0u8; compress_bound(data.len()) + 64];
    let mut frame = Vec::new();
    let step = ctx.compress_step(&mut out, &data).unwrap();
    frame.extend_from_slice(&out[..step.produced]);
    loop {
        let step = ctx.end_step(&mut out).unwrap();
        frame.extend_from_slice(&out[..step.produced]);
        if step.hint == 0 {
            break;
        }
    }

    let ddict = DecompressionDictionary::new(&dict_a()).unwrap();
    let back = zstdr::decompress_using_ddict(&frame, &ddict);
    // Streamed frames carry no content size.
    assert!(matches!(back, Err(Error::UnknownDecompressedSize)));
    let mut dec = zstdr::StreamDecoder::open(
        std::io::Cursor::new(frame),
        &zstdr::DecompressionConfig::new().with_dictionary(Arc::new(ddict)),
    )
    .unwrap();
    assert_eq!(dec.read(1024).unwrap(), data);
}
