//! Zstandard frames: one-shot compression, decompression and header
//! inspection.

pub mod compress;
pub mod decompress;
pub mod header;
pub mod scan;
pub mod types;

pub use compress::{compress, compress_bound, compress_with_context, compress_with_policy};
pub use decompress::decompress;
pub use header::{frame_content_size, header_size, is_zstd_frame, FrameHeader};
pub use scan::{frame_size, scan_frames, FrameSummary, ScanReport};
pub use types::{ContentSize, FrameKind, ZSTD_MAGICNUMBER};
