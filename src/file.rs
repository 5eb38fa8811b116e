//! File-level streaming: open a path as a compressing writer or a
//! decompressing reader.
//!
//! # Public API
//! - [`OpenMode`]: `"r"`/`"rb"` read, `"w"`/`"wb"` write
//! - [`StreamOptions`]: level, raw dictionary bytes, level policy, strategy
//! - [`open_path`]: returns a [`ZstdFile`] wrapping a [`File`]
//!
//! Paths may carry a leading `compress.zstd://` scheme, which is stripped.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use crate::config::{
    CompressionConfig, DecompressionConfig, EncodeStrategy, DEFAULT_LEVEL, STREAM_NAME,
};
use crate::dict::{CompressionDictionary, DecompressionDictionary};
use crate::error::{Error, Result};
use crate::level::{CompressionLevel, LevelPolicy};
use crate::stream::{StreamDecoder, StreamEncoder};

// ─────────────────────────────────────────────────────────────────────────────
// Open options
// ─────────────────────────────────────────────────────────────────────────────

/// Direction a path is opened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    Write,
}

impl OpenMode {
    /// Accepts exactly `r`, `rb`, `w` and `wb`.
    pub fn parse(mode: &str) -> Result<Self> {
        match mode {
            "r" | "rb" => Ok(OpenMode::Read),
            "w" | "wb" => Ok(OpenMode::Write),
            other => Err(Error::InvalidMode(other.to_owned())),
        }
    }
}

/// Per-open settings.  The dictionary is given as raw bytes and digested
/// for whichever direction the path is opened in.
#[derive(Debug, Clone, Default)]
pub struct StreamOptions {
    /// Compression level; `None` means [`DEFAULT_LEVEL`].
    pub level: Option<i32>,
    pub dictionary: Option<Vec<u8>>,
    pub policy: LevelPolicy,
    pub strategy: EncodeStrategy,
}

impl StreamOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_dictionary(mut self, dict: impl Into<Vec<u8>>) -> Self {
        self.dictionary = Some(dict.into());
        self
    }

    pub fn with_policy(mut self, policy: LevelPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_strategy(mut self, strategy: EncodeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    fn compression_config(&self) -> Result<CompressionConfig> {
        let level = self.level.unwrap_or(DEFAULT_LEVEL);
        let mut cfg = CompressionConfig::new()
            .with_level(level)
            .with_policy(self.policy)
            .with_strategy(self.strategy);
        if let Some(dict) = &self.dictionary {
            let level = CompressionLevel::for_stream(level, self.policy)?;
            cfg = cfg.with_dictionary(Arc::new(CompressionDictionary::new(dict, level)?));
        }
        Ok(cfg)
    }

    fn decompression_config(&self) -> Result<DecompressionConfig> {
        let mut cfg = DecompressionConfig::new();
        if let Some(dict) = &self.dictionary {
            cfg = cfg.with_dictionary(Arc::new(DecompressionDictionary::new(dict)?));
        }
        Ok(cfg)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ZstdFile
// ─────────────────────────────────────────────────────────────────────────────

/// A path opened for streaming compression or decompression.
pub enum ZstdFile {
    Reader(StreamDecoder<File>),
    Writer(StreamEncoder<File>),
}

impl ZstdFile {
    pub fn mode(&self) -> OpenMode {
        match self {
            ZstdFile::Reader(_) => OpenMode::Read,
            ZstdFile::Writer(_) => OpenMode::Write,
        }
    }

    /// Close the stream: a writer ends its frame first.  The file is closed
    /// either way.
    pub fn close(self) -> Result<()> {
        match self {
            ZstdFile::Reader(mut dec) => dec.close(),
            ZstdFile::Writer(mut enc) => enc.close(),
        }
    }
}

impl Read for ZstdFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            ZstdFile::Reader(dec) => Read::read(dec, buf),
            ZstdFile::Writer(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "zstd: stream was opened for writing",
            )),
        }
    }
}

impl Write for ZstdFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            ZstdFile::Writer(enc) => Write::write(enc, buf),
            ZstdFile::Reader(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "zstd: stream was opened for reading",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            ZstdFile::Writer(enc) => Write::flush(enc),
            ZstdFile::Reader(_) => Ok(()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Opening
// ─────────────────────────────────────────────────────────────────────────────

/// Remove a leading `compress.zstd` scheme (any case) and an optional `://`.
pub fn strip_scheme(path: &str) -> &str {
    let n = STREAM_NAME.len();
    match path.get(..n) {
        Some(head) if head.eq_ignore_ascii_case(STREAM_NAME) => {
            let rest = &path[n..];
            rest.strip_prefix("://").unwrap_or(rest)
        }
        _ => path,
    }
}

/// Open `path` in `mode` (`r`, `rb`, `w`, `wb`).
///
/// The mode is checked before the filesystem is touched.  Writing creates
/// or truncates the file.
pub fn open_path(path: &str, mode: &str, options: &StreamOptions) -> Result<ZstdFile> {
    let mode = OpenMode::parse(mode)?;
    let path = Path::new(strip_scheme(path));
    match mode {
        OpenMode::Write => {
            let cfg = options.compression_config()?;
            let file = File::create(path)?;
            Ok(ZstdFile::Writer(StreamEncoder::open(file, &cfg)?))
        }
        OpenMode::Read => {
            let cfg = options.decompression_config()?;
            let file = File::open(path)?;
            Ok(ZstdFile::Reader(StreamDecoder::open(file, &cfg)?))
        }
    }
}
