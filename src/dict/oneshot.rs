//! One-shot compression and decompression bound to a dictionary.
//!
//! The `*_with_dictionary` entry points build a fresh context and a fresh
//! digested dictionary per call and drop both before returning, on success
//! and on every error path.  The `*_using_*dict` variants take a dictionary
//! that was digested once by the caller.

use crate::buffer::FrameBuffer;
use crate::context::{compress_bound, CompressionContext, DecompressionContext};
use crate::dict::{CompressionDictionary, DecompressionDictionary};
use crate::error::{Error, Result};
use crate::frame::header::FrameHeader;
use crate::frame::types::max_content_for;
use crate::level::{CompressionLevel, LevelPolicy};

// ─────────────────────────────────────────────────────────────────────────────
// Compression
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `input` against raw dictionary bytes `dict` at `level`.
///
/// Errors, in the order they are checked: [`Error::InvalidLevel`],
/// [`Error::ContextCreationFailed`], [`Error::DictionaryBuildFailed`],
/// [`Error::Transform`].
pub fn compress_with_dictionary(input: &[u8], dict: &[u8], level: i32) -> Result<FrameBuffer> {
    compress_with_dictionary_policy(input, dict, level, LevelPolicy::default())
}

/// [`compress_with_dictionary`] with an explicit level policy.
pub fn compress_with_dictionary_policy(
    input: &[u8],
    dict: &[u8],
    level: i32,
    policy: LevelPolicy,
) -> Result<FrameBuffer> {
    let level = CompressionLevel::new(level, policy)?;
    let mut ctx = CompressionContext::create()?;
    let cdict = CompressionDictionary::new(dict, level)?;
    compress_into_frame(&mut ctx, input, &cdict)
}

/// Compress `input` with a dictionary digested earlier.  The frame uses the
/// dictionary's level.
pub fn compress_using_cdict(input: &[u8], cdict: &CompressionDictionary) -> Result<FrameBuffer> {
    let mut ctx = CompressionContext::create()?;
    compress_into_frame(&mut ctx, input, cdict)
}

fn compress_into_frame(
    ctx: &mut CompressionContext,
    input: &[u8],
    cdict: &CompressionDictionary,
) -> Result<FrameBuffer> {
    let mut out = FrameBuffer::with_capacity(compress_bound(input.len()));
    let written = ctx.compress_using_dictionary(out.spare_mut(), input, cdict)?;
    out.advance(written);
    out.truncate(written);
    Ok(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Decompression
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress a frame produced with the same dictionary bytes.
///
/// The frame must declare its content size ([`Error::UnknownDecompressedSize`]
/// otherwise); there is no growth fallback on this path.  A decoded length
/// different from the declared one is [`Error::SizeMismatch`].
pub fn decompress_with_dictionary(input: &[u8], dict: &[u8]) -> Result<FrameBuffer> {
    let declared = declared_size(input)?;
    let mut ctx = DecompressionContext::create()?;
    let ddict = DecompressionDictionary::new(dict)?;
    decompress_into_frame(&mut ctx, input, &ddict, declared)
}

/// [`decompress_with_dictionary`] with a dictionary digested earlier.
pub fn decompress_using_ddict(input: &[u8], ddict: &DecompressionDictionary) -> Result<FrameBuffer> {
    let declared = declared_size(input)?;
    let mut ctx = DecompressionContext::create()?;
    decompress_into_frame(&mut ctx, input, ddict, declared)
}

fn declared_size(input: &[u8]) -> Result<usize> {
    let header = FrameHeader::parse(input)?;
    let declared = header
        .content_size
        .known()
        .ok_or(Error::UnknownDecompressedSize)?;
    if declared > max_content_for(input.len()) {
        return Err(Error::ContentSizeTooLarge { declared });
    }
    usize::try_from(declared).map_err(|_| Error::ContentSizeTooLarge { declared })
}

fn decompress_into_frame(
    ctx: &mut DecompressionContext,
    input: &[u8],
    ddict: &DecompressionDictionary,
    declared: usize,
) -> Result<FrameBuffer> {
    let mut out = FrameBuffer::with_capacity(declared);
    let produced = ctx.decompress_using_dictionary(out.spare_mut(), input, ddict)?;
    if produced != declared {
        return Err(Error::SizeMismatch {
            expected: declared as u64,
            actual: produced as u64,
        });
    }
    out.advance(produced);
    Ok(out)
}
