// Path opener: scheme stripping, modes and a filesystem round trip.

use std::io::{Read, Write};

use tempfile::TempDir;
use zstdr::{open_path, EncodeStrategy, Error, OpenMode, StreamOptions};

#[test]
fn write_then_read_through_the_filesystem() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.zst");
    let url = format!("compress.zstd://{}", path.display());
    let data = b"persisted through open_path ".repeat(3_000);

    let mut file = open_path(&url, "wb", &StreamOptions::new().with_level(7)).unwrap();
    assert_eq!(file.mode(), OpenMode::Write);
    file.write_all(&data).unwrap();
    file.close().unwrap();

    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(zstdr::decompress(&on_disk).unwrap(), data);

    let mut file = open_path(path.to_str().unwrap(), "r", &StreamOptions::new()).unwrap();
    let mut back = Vec::new();
    file.read_to_end(&mut back).unwrap();
    assert_eq!(back, data);
}

#[test]
fn dictionary_and_staged_options() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dict.zst");
    let p = path.to_str().unwrap();
    let dict = b"common prefix for every record: ".repeat(10);
    let opts = StreamOptions::new()
        .with_dictionary(dict.clone())
        .with_strategy(EncodeStrategy::Staged);

    let mut w = open_path(p, "w", &opts).unwrap();
    w.write_all(b"common prefix for every record: 42").unwrap();
    w.close().unwrap();

    let mut r = open_path(p, "rb", &opts).unwrap();
    let mut back = Vec::new();
    r.read_to_end(&mut back).unwrap();
    assert_eq!(back, b"common prefix for every record: 42");
}

#[test]
fn wrong_direction_is_unsupported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dir.zst");
    let p = path.to_str().unwrap();
    let mut w = open_path(p, "w", &StreamOptions::new()).unwrap();
    let mut buf = [0u8; 4];
    assert_eq!(w.read(&mut buf).unwrap_err().kind(), std::io::ErrorKind::Unsupported);
    w.close().unwrap();

    let mut r = open_path(p, "r", &StreamOptions::new()).unwrap();
    assert_eq!(r.write(b"x").unwrap_err().kind(), std::io::ErrorKind::Unsupported);
}

#[test]
fn bad_mode_and_missing_file() {
    assert!(matches!(
        open_path("whatever.zst", "a+", &StreamOptions::new()),
        Err(Error::InvalidMode(m)) if m == "a+"
    ));
    assert!(matches!(
        open_path("/no/such/dir/file.zst", "r", &StreamOptions::new()),
        Err(Error::Io(_))
    ));
}
