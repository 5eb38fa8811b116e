//! zstdr: Zstandard frame codec, dictionary contexts and streaming engine.
//!
//! The crate has three layers over libzstd:
//!
//! - [`frame`]: one-shot compression and decompression of whole buffers,
//!   plus native frame header parsing
//! - [`dict`]: reusable digested dictionaries and one-shot dictionary
//!   compression
//! - [`stream`]: resumable [`StreamEncoder`] / [`StreamDecoder`] over any
//!   `io::Write` / `io::Read`
//!
//! [`file::open_path`] opens a filesystem path as either kind of stream.
//!
//! ```
//! let data = b"hello hello hello hello".repeat(100);
//! let frame = zstdr::compress(&data, 3).unwrap();
//! assert_eq!(zstdr::decompress(&frame).unwrap().as_slice(), &data[..]);
//! ```

pub mod display;

pub mod buffer;
pub mod cli;
pub mod config;
pub mod context;
pub mod dict;
pub mod error;
pub mod file;
pub mod frame;
pub mod level;
pub mod stream;
pub mod util;

use zstd::zstd_safe;

/// Version of the linked libzstd as `major * 10000 + minor * 100 + patch`.
pub fn version_number() -> u32 {
    zstd_safe::version_number()
}

/// Version of the linked libzstd, e.g. `"1.5.6"`.
pub fn version_string() -> &'static str {
    zstd_safe::version_string()
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use buffer::{BufferCursor, FrameBuffer};
pub use config::{CompressionConfig, DecompressionConfig, EncodeStrategy, DEFAULT_LEVEL};
pub use context::{CompressionContext, DecompressionContext, Step};
pub use dict::{
    compress_using_cdict, compress_with_dictionary, decompress_using_ddict,
    decompress_with_dictionary, dictionary_id, CompressionDictionary, DecompressionDictionary,
};
pub use error::{Error, Result};
pub use file::{open_path, OpenMode, StreamOptions, ZstdFile};
pub use frame::{
    compress, compress_bound, compress_with_policy, decompress, frame_content_size, ContentSize,
    FrameHeader,
};
pub use level::{CompressionLevel, LevelPolicy};
pub use stream::{copy_decode, copy_encode, StreamDecoder, StreamEncoder};
