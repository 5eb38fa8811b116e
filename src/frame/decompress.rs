//! One-shot frame decompression.
//!
//! Skippable frames at the front are stepped over; the first regular frame
//! then decides the path:
//!
//! - declared content size and nothing after the frame: allocate exactly that
//!   much, decode in one call and insist the produced length matches;
//! - no declared size, or more frames follow: run the streaming decoder over
//!   the rest of the input, growing the output by one `dstream_out_size()`
//!   increment each time it fills, so every frame is decoded back to back.
//!
//! Input holding only skippable frames decodes to nothing.

use crate::buffer::FrameBuffer;
use crate::config::dstream_out_size;
use crate::context::DecompressionContext;
use crate::error::{Error, Result};
use crate::frame::header::FrameHeader;
use crate::frame::scan::frame_size;
use crate::frame::types::{max_content_for, ContentSize, FrameKind, SKIPPABLE_HEADER_SIZE};

/// Decompress every frame in `input`, concatenating their content.
///
/// Fails with [`Error::NotAZstdFrame`] when `input` does not start with a
/// frame header, [`Error::ContentSizeTooLarge`] when the declared size is
/// impossible for the input length, [`Error::SizeMismatch`] when the decoded
/// length disagrees with the header and [`Error::Truncated`] when input ends
/// mid-frame.
pub fn decompress(input: &[u8]) -> Result<FrameBuffer> {
    let mut offset = 0;
    loop {
        let rest = &input[offset..];
        let header = FrameHeader::parse(rest)?;
        match (header.kind, header.content_size) {
            (FrameKind::Skippable { payload_len }, _) => {
                let next = SKIPPABLE_HEADER_SIZE + payload_len as usize;
                if rest.len() < next {
                    return Err(Error::Truncated { produced: 0 });
                }
                if rest.len() == next {
                    return Ok(FrameBuffer::new());
                }
                offset += next;
            }
            (FrameKind::Zstd, ContentSize::Known(declared)) => {
                return match frame_size(rest) {
                    Ok((_, len)) if len < rest.len() => decompress_unbounded(rest),
                    _ => decompress_known(rest, declared),
                };
            }
            (FrameKind::Zstd, ContentSize::Unknown) => return decompress_unbounded(rest),
        }
    }
}

fn decompress_known(input: &[u8], declared: u64) -> Result<FrameBuffer> {
    if declared > max_content_for(input.len()) {
        return Err(Error::ContentSizeTooLarge { declared });
    }
    let capacity = usize::try_from(declared).map_err(|_| Error::ContentSizeTooLarge { declared })?;

    let mut ctx = DecompressionContext::create()?;
    let mut out = FrameBuffer::with_capacity(capacity);
    let produced = ctx.decompress(out.spare_mut(), input)?;
    if produced as u64 != declared {
        return Err(Error::SizeMismatch {
            expected: declared,
            actual: produced as u64,
        });
    }
    out.advance(produced);
    Ok(out)
}

/// Growth loop for frames that omit their content size.
///
/// Stops once the decoder reports a finished frame and no input is left.
/// While output is full the decoder is stepped again even with no input
/// left, since it may still hold decoded bytes.
fn decompress_unbounded(input: &[u8]) -> Result<FrameBuffer> {
    let increment = dstream_out_size();
    let mut ctx = DecompressionContext::create()?;
    let mut out = FrameBuffer::with_capacity(increment);
    let mut consumed = 0usize;

    loop {
        if out.len() == out.capacity() {
            out.grow_by(increment);
        }
        let step = ctx.decompress_step(out.spare_mut(), &input[consumed..])?;
        consumed += step.consumed;
        out.advance(step.produced);

        let input_done = consumed == input.len();
        if step.hint == 0 {
            if input_done {
                break;
            }
            // Another frame follows.
            continue;
        }
        if input_done && out.len() < out.capacity() {
            return Err(Error::Truncated { produced: out.len() });
        }
    }

    let len = out.len();
    out.truncate(len);
    Ok(out)
}
