// StreamEncoder lifecycle through the public API.

use std::io::{self, Write};
use std::sync::Arc;

use zstdr::level::max_level;
use zstdr::stream::EncoderState;
use zstdr::{
    decompress, decompress_with_dictionary, CompressionConfig, CompressionDictionary,
    CompressionLevel, EncodeStrategy, Error, LevelPolicy, StreamEncoder,
};

/// Writer that shares its bytes so they can be inspected while the
/// encoder still owns it.
#[derive(Clone, Default)]
struct Shared(Arc<std::sync::Mutex<Vec<u8>>>);

impl Shared {
    fn bytes(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }
}

impl Write for Shared {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn close_writes_a_complete_frame() {
    let sink = Shared::default();
    let mut enc = StreamEncoder::open(sink.clone(), &CompressionConfig::new()).unwrap();
    enc.write_all(b"first part, ").unwrap();
    enc.write_all(b"second part").unwrap();
    enc.close().unwrap();
    assert!(enc.is_closed());
    assert_eq!(decompress(&sink.bytes()).unwrap(), b"first part, second part".to_vec());
}

#[test]
fn flushed_prefix_is_decodable_before_close() {
    let sink = Shared::default();
    let cfg = CompressionConfig::new().with_strategy(EncodeStrategy::Staged);
    let mut enc = StreamEncoder::open(sink.clone(), &cfg).unwrap();
    enc.write(b"visible after flush").unwrap();
    enc.flush().unwrap();

    let mut dec = zstdr::StreamDecoder::open(
        io::Cursor::new(sink.bytes()),
        &zstdr::DecompressionConfig::new(),
    )
    .unwrap();
    assert_eq!(dec.read(100).unwrap(), b"visible after flush".to_vec());
    assert!(!dec.is_frame_complete());
    enc.close().unwrap();
}

#[test]
fn second_flush_writes_nothing() {
    for strategy in [EncodeStrategy::Direct, EncodeStrategy::Staged] {
        let sink = Shared::default();
        let cfg = CompressionConfig::new().with_strategy(strategy);
        let mut enc = StreamEncoder::open(sink.clone(), &cfg).unwrap();
        enc.write(b"some pending bytes").unwrap();
        enc.flush().unwrap();
        let after_first = sink.bytes().len();
        assert!(after_first > 0);
        enc.flush().unwrap();
        assert_eq!(sink.bytes().len(), after_first, "{strategy:?}");
        enc.close().unwrap();
    }
}

#[test]
fn writes_after_close_fail() {
    let mut enc = StreamEncoder::open(Vec::new(), &CompressionConfig::new()).unwrap();
    enc.close().unwrap();
    assert!(matches!(enc.write(b"late"), Err(Error::StreamClosed)));
    assert!(matches!(enc.flush(), Err(Error::StreamClosed)));
    assert!(matches!(enc.close(), Err(Error::StreamClosed)));
    assert_eq!(enc.state(), EncoderState::Closed);
}

#[test]
fn level_above_max_is_clamped_for_streams() {
    let cfg = CompressionConfig::new().with_level(max_level() + 10);
    let enc = StreamEncoder::open(Vec::new(), &cfg).unwrap();
    assert_eq!(enc.level().get(), max_level());
}

#[test]
fn level_below_policy_minimum_fails() {
    let cfg = CompressionConfig::new().with_level(-1).with_policy(LevelPolicy::Legacy);
    assert!(matches!(
        StreamEncoder::open(Vec::new(), &cfg),
        Err(Error::InvalidLevel { level: -1, .. })
    ));
}

#[test]
fn dictionary_stream_matches_one_shot_decode() {
    let dict = b"timestamp=2024-01-01 level=INFO service=api message=".repeat(8);
    let level = CompressionLevel::new(6, LevelPolicy::Modern).unwrap();
    let cdict = Arc::new(CompressionDictionary::new(&dict, level).unwrap());
    let cfg = CompressionConfig::new().with_level(1).with_dictionary(cdict);

    let mut enc = StreamEncoder::open(Vec::new(), &cfg).unwrap();
    assert_eq!(enc.level().get(), 6);
    assert_eq!(enc.dictionary_id(), Some(0));
    let line = b"timestamp=2024-01-01 level=INFO service=api message=started\n";
    enc.write(line).unwrap();
    let frame = enc.finish().unwrap();

    let mut dec = zstdr::StreamDecoder::open(
        io::Cursor::new(frame.clone()),
        &zstdr::DecompressionConfig::new().with_dictionary_bytes(&dict).unwrap(),
    )
    .unwrap();
    assert_eq!(dec.read(1000).unwrap(), line.to_vec());
    // No declared size on a streamed frame.
    assert!(decompress_with_dictionary(&frame, &dict).is_err());
}
