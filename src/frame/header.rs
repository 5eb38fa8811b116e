//! Frame header inspection.
//!
//! Parses just enough of a frame prologue to decide how a buffer should be
//! decompressed: regular or skippable frame, declared content size,
//! dictionary ID and window size.  Nothing past the header is examined.
//!
//! Covers:
//! - LE read helpers (`read_le16`, `read_le32`, `read_le64`)
//! - [`FrameHeader::parse`]: full header decode
//! - [`frame_content_size`], [`header_size`], [`is_zstd_frame`]: shortcuts

use crate::error::{Error, Result};
use crate::frame::types::{
    ContentSize, FrameKind, FHD_CHECKSUM, FHD_DICT_ID_MASK, FHD_FCS_SHIFT, FHD_RESERVED,
    FHD_SINGLE_SEGMENT, SKIPPABLE_HEADER_SIZE, WINDOW_LOG_ABSOLUTE_MIN, WINDOW_LOG_MAX,
    ZSTD_MAGICNUMBER, ZSTD_MAGIC_SKIPPABLE_MASK, ZSTD_MAGIC_SKIPPABLE_START,
};

// ─────────────────────────────────────────────────────────────────────────────
// Byte-order helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Read a little-endian `u16` from `src` at byte `offset`.
#[inline]
pub fn read_le16(src: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([src[offset], src[offset + 1]])
}

/// Read a little-endian `u32` from `src` at byte `offset`.
#[inline]
pub fn read_le32(src: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        src[offset],
        src[offset + 1],
        src[offset + 2],
        src[offset + 3],
    ])
}

/// Read a little-endian `u64` from `src` at byte `offset`.
#[inline]
pub fn read_le64(src: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&src[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}

// ─────────────────────────────────────────────────────────────────────────────
// FrameHeader
// ─────────────────────────────────────────────────────────────────────────────

/// Decoded frame prologue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub kind: FrameKind,
    /// Bytes occupied by the header, magic number included.
    pub header_len: usize,
    /// Single-segment frames omit the window descriptor; the window is the
    /// whole content.
    pub single_segment: bool,
    /// A 4-byte content checksum follows the last block.
    pub checksum: bool,
    /// Dictionary ID, `0` when absent.
    pub dict_id: u32,
    /// Window size the decoder must provide.  For single-segment frames
    /// this equals the content size.
    pub window_size: u64,
    pub content_size: ContentSize,
}

impl FrameHeader {
    /// Parse the header at the start of `src`.
    ///
    /// Short input, an unknown magic number, the reserved FHD bit or an
    /// oversized window all fail with [`Error::NotAZstdFrame`].
    pub fn parse(src: &[u8]) -> Result<Self> {
        if src.len() < 4 {
            return Err(Error::NotAZstdFrame);
        }
        let magic = read_le32(src, 0);

        if (magic & ZSTD_MAGIC_SKIPPABLE_MASK) == ZSTD_MAGIC_SKIPPABLE_START {
            if src.len() < SKIPPABLE_HEADER_SIZE {
                return Err(Error::NotAZstdFrame);
            }
            return Ok(FrameHeader {
                kind: FrameKind::Skippable {
                    payload_len: read_le32(src, 4),
                },
                header_len: SKIPPABLE_HEADER_SIZE,
                single_segment: false,
                checksum: false,
                dict_id: 0,
                window_size: 0,
                content_size: ContentSize::Known(0),
            });
        }

        if magic != ZSTD_MAGICNUMBER || src.len() < 5 {
            return Err(Error::NotAZstdFrame);
        }

        let fhd = src[4];
        if fhd & FHD_RESERVED != 0 {
            return Err(Error::NotAZstdFrame);
        }
        let single_segment = fhd & FHD_SINGLE_SEGMENT != 0;
        let dict_id_len = match fhd & FHD_DICT_ID_MASK {
            0 => 0,
            1 => 1,
            2 => 2,
            _ => 4,
        };
        let fcs_len = match fhd >> FHD_FCS_SHIFT {
            0 if single_segment => 1,
            0 => 0,
            1 => 2,
            2 => 4,
            _ => 8,
        };

        let header_len = 5 + usize::from(!single_segment) + dict_id_len + fcs_len;
        if src.len() < header_len {
            return Err(Error::NotAZstdFrame);
        }

        let mut pos = 5;
        let mut window_size = 0u64;
        if !single_segment {
            let wd = src[pos];
            let exponent = u32::from(wd >> 3) + WINDOW_LOG_ABSOLUTE_MIN;
            if exponent > WINDOW_LOG_MAX {
                return Err(Error::NotAZstdFrame);
            }
            let base = 1u64 << exponent;
            window_size = base + (base / 8) * u64::from(wd & 0x07);
            pos += 1;
        }

        let dict_id = match dict_id_len {
            0 => 0,
            1 => u32::from(src[pos]),
            2 => u32::from(read_le16(src, pos)),
            _ => read_le32(src, pos),
        };
        pos += dict_id_len;

        let content_size = match fcs_len {
            0 => ContentSize::Unknown,
            1 => ContentSize::Known(u64::from(src[pos])),
            2 => ContentSize::Known(u64::from(read_le16(src, pos)) + 256),
            4 => ContentSize::Known(u64::from(read_le32(src, pos))),
            _ => ContentSize::Known(read_le64(src, pos)),
        };

        if single_segment {
            window_size = content_size.known().unwrap_or(0);
        }

        Ok(FrameHeader {
            kind: FrameKind::Zstd,
            header_len,
            single_segment,
            checksum: fhd & FHD_CHECKSUM != 0,
            dict_id,
            window_size,
            content_size,
        })
    }

    #[inline]
    pub fn is_skippable(&self) -> bool {
        matches!(self.kind, FrameKind::Skippable { .. })
    }
}

/// Declared content size of the frame at the start of `src`.
pub fn frame_content_size(src: &[u8]) -> Result<ContentSize> {
    FrameHeader::parse(src).map(|h| h.content_size)
}

/// Header length of the frame at the start of `src`.
pub fn header_size(src: &[u8]) -> Result<usize> {
    FrameHeader::parse(src).map(|h| h.header_len)
}

/// `true` if `src` starts with a parseable regular or skippable frame header.
pub fn is_zstd_frame(src: &[u8]) -> bool {
    FrameHeader::parse(src).is_ok()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
