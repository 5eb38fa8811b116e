//! One-shot frame compression.
//!
//! The whole input is compressed in a single transform into a buffer sized
//! by [`compress_bound`], which is then trimmed to the produced length.  No
//! partial result escapes on failure.

use crate::buffer::FrameBuffer;
use crate::context::CompressionContext;
use crate::error::Result;
use crate::level::{CompressionLevel, LevelPolicy};

pub use crate::context::compress_bound;

/// Compress `input` into a single frame at `level`, validated under the
/// default [`LevelPolicy`].
///
/// `level == 0` selects the default level.  Levels outside the policy range
/// fail with [`Error::InvalidLevel`](crate::Error::InvalidLevel) before any
/// allocation.
pub fn compress(input: &[u8], level: i32) -> Result<FrameBuffer> {
    compress_with_policy(input, level, LevelPolicy::default())
}

/// [`compress`] with an explicit level policy.
pub fn compress_with_policy(input: &[u8], level: i32, policy: LevelPolicy) -> Result<FrameBuffer> {
    let level = CompressionLevel::new(level, policy)?;
    let mut ctx = CompressionContext::create()?;
    compress_with_context(&mut ctx, input, level)
}

/// Compress with a caller-owned context, so repeated calls reuse its
/// working memory.
pub fn compress_with_context(
    ctx: &mut CompressionContext,
    input: &[u8],
    level: CompressionLevel,
) -> Result<FrameBuffer> {
    let mut out = FrameBuffer::with_capacity(compress_bound(input.len()));
    let written = ctx.compress(out.spare_mut(), input, level)?;
    out.advance(written);
    out.truncate(written);
    Ok(out)
}
