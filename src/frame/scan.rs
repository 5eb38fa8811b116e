//! Frame walking without decompression, used by `--list`.
//!
//! Each regular frame is sized by reading its block headers and stepping
//! over the payloads; skippable frames are stepped over using their length
//! field.  Nothing is decoded.

use crate::error::{Error, Result};
use crate::frame::header::FrameHeader;
use crate::frame::types::{ContentSize, FrameKind, SKIPPABLE_HEADER_SIZE};

/// Size of a block header.
const BLOCK_HEADER_SIZE: usize = 3;

/// Size of the content checksum after the last block.
const CHECKSUM_SIZE: usize = 4;

/// One frame found by [`scan_frames`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSummary {
    pub header: FrameHeader,
    /// Bytes the frame occupies, header and checksum included.
    pub compressed_size: u64,
}

/// Every frame of a buffer, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub frames: Vec<FrameSummary>,
}

impl ScanReport {
    /// Regular (non-skippable) frames.
    pub fn zstd_frames(&self) -> usize {
        self.frames.iter().filter(|f| !f.header.is_skippable()).count()
    }

    pub fn skippable_frames(&self) -> usize {
        self.frames.len() - self.zstd_frames()
    }

    pub fn compressed_size(&self) -> u64 {
        self.frames.iter().map(|f| f.compressed_size).sum()
    }

    /// Sum of declared content sizes; unknown if any regular frame omits it.
    pub fn content_size(&self) -> ContentSize {
        let mut total = 0u64;
        for frame in &self.frames {
            match frame.header.content_size {
                ContentSize::Known(n) => total = total.saturating_add(n),
                ContentSize::Unknown => return ContentSize::Unknown,
            }
        }
        ContentSize::Known(total)
    }

    /// `true` when every regular frame carries a content checksum.
    pub fn all_checksummed(&self) -> bool {
        self.frames
            .iter()
            .filter(|f| !f.header.is_skippable())
            .all(|f| f.header.checksum)
    }
}

/// Walk every frame in `src`.
///
/// Fails with [`Error::NotAZstdFrame`] at the first byte that does not start
/// a frame, and with [`Error::Truncated`] if a frame runs past the end.
pub fn scan_frames(src: &[u8]) -> Result<ScanReport> {
    let mut report = ScanReport::default();
    let mut pos = 0;
    while pos < src.len() {
        let (header, size) = frame_size(&src[pos..])?;
        report.frames.push(FrameSummary {
            header,
            compressed_size: size as u64,
        });
        pos += size;
    }
    Ok(report)
}

/// Header and total length of the frame at the start of `src`.
///
/// Fails with [`Error::Truncated`] if the frame runs past the end of `src`.
pub fn frame_size(src: &[u8]) -> Result<(FrameHeader, usize)> {
    let header = FrameHeader::parse(src)?;
    let size = match header.kind {
        FrameKind::Skippable { payload_len } => SKIPPABLE_HEADER_SIZE + payload_len as usize,
        FrameKind::Zstd => {
            header.header_len + blocks_size(&src[header.header_len..], header.checksum)?
        }
    };
    if size > src.len() {
        return Err(Error::Truncated { produced: 0 });
    }
    Ok((header, size))
}

/// Length of the block sequence (plus checksum) at the start of `src`.
fn blocks_size(src: &[u8], checksum: bool) -> Result<usize> {
    let mut pos = 0;
    loop {
        let Some(raw) = src.get(pos..pos + BLOCK_HEADER_SIZE) else {
            return Err(Error::Truncated { produced: 0 });
        };
        let bits = u32::from(raw[0]) | u32::from(raw[1]) << 8 | u32::from(raw[2]) << 16;
        let last = bits & 1 != 0;
        let block_size = (bits >> 3) as usize;
        let payload = match (bits >> 1) & 3 {
            0 | 2 => block_size,
            1 => 1,
            _ => return Err(Error::NotAZstdFrame),
        };
        pos += BLOCK_HEADER_SIZE + payload;
        if last {
            break;
        }
    }
    if checksum {
        pos += CHECKSUM_SIZE;
    }
    Ok(pos)
}
