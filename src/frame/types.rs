//! Zstandard frame format constants and header-derived value types.
//!
//! Layout of a frame header (RFC 8878 §3.1.1):
//!
//! ```text
//!  magic (4) | FHD (1) | [window descriptor (1)] | [dict id (0/1/2/4)] | [content size (0/1/2/4/8)]
//! ```
//!
//! The Frame Header Descriptor byte packs the field sizes:
//!
//! | bits | field                                 |
//! |------|---------------------------------------|
//! | 7-6  | content-size flag                     |
//! | 5    | single-segment flag                   |
//! | 4    | unused                                |
//! | 3    | reserved, must be zero                |
//! | 2    | content-checksum flag                 |
//! | 1-0  | dictionary-id flag                    |

// ─────────────────────────────────────────────────────────────────────────────
// Magic numbers
// ─────────────────────────────────────────────────────────────────────────────

/// Magic number opening every Zstandard frame (little-endian on the wire).
pub const ZSTD_MAGICNUMBER: u32 = 0xFD2F_B528;

/// First of the sixteen skippable-frame magic numbers `0x184D2A50..=0x184D2A5F`.
pub const ZSTD_MAGIC_SKIPPABLE_START: u32 = 0x184D_2A50;

/// Mask selecting the fixed part of a skippable magic number.
pub const ZSTD_MAGIC_SKIPPABLE_MASK: u32 = 0xFFFF_FFF0;

// ─────────────────────────────────────────────────────────────────────────────
// Header sizes
// ─────────────────────────────────────────────────────────────────────────────

/// Smallest possible frame header: magic, FHD and one more byte (window
/// descriptor, or a 1-byte content size in single-segment mode).
pub const FRAME_HEADER_SIZE_MIN: usize = 6;

/// Largest possible frame header: magic + FHD + window + 4-byte dict id + 8-byte size.
pub const FRAME_HEADER_SIZE_MAX: usize = 18;

/// Skippable frame header: magic followed by a 4-byte payload length.
pub const SKIPPABLE_HEADER_SIZE: usize = 8;

/// Largest block payload a frame may carry.  Each block costs at least a
/// 3-byte header plus one payload byte, which bounds how much content a
/// frame of a given length can describe.
pub const BLOCK_SIZE_MAX: usize = 128 * 1024;

/// Smallest encoded block: 3-byte block header + 1 byte of RLE payload.
pub const BLOCK_ENCODED_MIN: usize = 4;

// FHD bit fields.
pub(crate) const FHD_FCS_SHIFT: u8 = 6;
pub(crate) const FHD_SINGLE_SEGMENT: u8 = 0x20;
pub(crate) const FHD_RESERVED: u8 = 0x08;
pub(crate) const FHD_CHECKSUM: u8 = 0x04;
pub(crate) const FHD_DICT_ID_MASK: u8 = 0x03;

// Window descriptor.
pub(crate) const WINDOW_LOG_ABSOLUTE_MIN: u32 = 10;
/// Largest window exponent a 64-bit decoder accepts (`ZSTD_WINDOWLOG_MAX_64`).
pub(crate) const WINDOW_LOG_MAX: u32 = 31;

// ─────────────────────────────────────────────────────────────────────────────
// Header-derived values
// ─────────────────────────────────────────────────────────────────────────────

/// Kind of frame found at the start of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// A regular compressed frame.
    Zstd,
    /// A skippable frame carrying `payload_len` opaque bytes; decodes to nothing.
    Skippable { payload_len: u32 },
}

/// Decompressed size as recorded in the frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSize {
    /// The header declares exactly this many bytes.
    Known(u64),
    /// The content-size field was omitted (streaming encoders do this).
    Unknown,
}

impl ContentSize {
    /// The declared size, if any.
    #[inline]
    pub fn known(self) -> Option<u64> {
        match self {
            ContentSize::Known(n) => Some(n),
            ContentSize::Unknown => None,
        }
    }

    #[inline]
    pub fn is_known(self) -> bool {
        matches!(self, ContentSize::Known(_))
    }
}

/// Upper bound on the content a frame of `frame_len` bytes can decode to.
///
/// Every block needs [`BLOCK_ENCODED_MIN`] bytes and yields at most
/// [`BLOCK_SIZE_MAX`]; one extra block covers rounding.
#[inline]
pub fn max_content_for(frame_len: usize) -> u64 {
    let blocks = (frame_len / BLOCK_ENCODED_MIN) as u64 + 1;
    blocks.saturating_mul(BLOCK_SIZE_MAX as u64)
}
