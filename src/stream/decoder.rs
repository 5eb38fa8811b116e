//! Streaming decompressor over any `R: Read`.
//!
//! [`StreamDecoder::read_into`] runs two nested loops.  The outer one keeps
//! going until the caller's buffer is full or the backing reader is
//! exhausted.  The inner one first hands out bytes already sitting in the
//! output staging buffer, then steps the decoder once over the buffered
//! input, pulling a fresh chunk from the reader only when buffered input is
//! used up.  A step that fills the output staging buffer completely is
//! followed by another step even without new input, since the context may
//! still hold decoded bytes.
//!
//! Concatenated frames decode back to back.  Reaching the end of the reader
//! in the middle of a frame ends the read short and logs a warning;
//! [`is_frame_complete`](StreamDecoder::is_frame_complete) tells the two
//! apart.

use std::io::{self, Read};

use crate::buffer::BufferCursor;
use crate::config::{dstream_in_size, dstream_out_size, DecompressionConfig};
use crate::context::DecompressionContext;
use crate::error::{Error, Result};
use crate::stream::state::DecoderState;

// ─────────────────────────────────────────────────────────────────────────────
// StreamDecoder<R>
// ─────────────────────────────────────────────────────────────────────────────

/// Streaming frame decompressor backed by a reader.
pub struct StreamDecoder<R: Read> {
    ctx: DecompressionContext,
    inner: Option<R>,
    /// Compressed bytes read from `inner`, `dstream_in_size()` bytes.
    input: BufferCursor,
    /// Decoded bytes not yet handed out, `dstream_out_size()` bytes.
    output: BufferCursor,
    /// Last step filled `output` completely.
    needs_drain: bool,
    /// No frame is partially decoded.
    frame_complete: bool,
    /// `inner` reported end of data.
    eof: bool,
    /// Compressed bytes pulled from `inner` so far.
    total_in: u64,
    state: DecoderState,
}

impl<R: Read> StreamDecoder<R> {
    /// Open a decoder on `reader`.  Nothing is read until the first
    /// [`read`](Self::read).
    pub fn open(reader: R, config: &DecompressionConfig) -> Result<Self> {
        let mut ctx = DecompressionContext::create()?;
        ctx.begin_stream(config.dictionary.clone())?;
        Ok(StreamDecoder {
            ctx,
            inner: Some(reader),
            input: BufferCursor::with_capacity(dstream_in_size()),
            output: BufferCursor::with_capacity(dstream_out_size()),
            needs_drain: false,
            frame_complete: true,
            eof: false,
            total_in: 0,
            state: DecoderState::Reading,
        })
    }

    /// Read up to `count` decoded bytes.  Fewer are returned only at the end
    /// of the backing data.
    pub fn read(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; count];
        let n = self.read_into(&mut buf)?;
        buf.truncate(n);
        Ok(buf)
    }

    /// Fill `dst` with decoded bytes; returns how many were written.  `0`
    /// for a non-empty `dst` means end of data.
    pub fn read_into(&mut self, dst: &mut [u8]) -> Result<usize> {
        self.state.ensure_readable()?;
        let result = self.fill(dst);
        if let Err(e) = &result {
            crate::displaylevel!(1, "zstd: decompression stream failed: {}\n", e);
            self.state = DecoderState::Failed;
        }
        result
    }

    /// Release the context and buffers and drop the reader.
    pub fn close(&mut self) -> Result<()> {
        if self.state == DecoderState::Closed {
            return Err(Error::StreamClosed);
        }
        self.release();
        self.inner = None;
        Ok(())
    }

    /// Release the context and buffers and hand the reader back.
    pub fn into_inner(mut self) -> Result<R> {
        if self.state == DecoderState::Closed {
            return Err(Error::StreamClosed);
        }
        self.release();
        self.inner.take().ok_or(Error::StreamClosed)
    }

    /// `true` when no frame is partially decoded: either nothing has been
    /// read yet or the last decoded frame ended cleanly.
    #[inline]
    pub fn is_frame_complete(&self) -> bool {
        self.frame_complete
    }

    /// Compressed bytes read from the backing reader so far.
    #[inline]
    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    #[inline]
    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn dictionary_id(&self) -> Option<u32> {
        self.ctx.dictionary().map(|d| d.id())
    }

    // ── internals ───────────────────────────────────────────────────────────

    fn fill(&mut self, dst: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        loop {
            filled += self.output.drain_into(&mut dst[filled..]);
            if filled == dst.len() || !self.decode_more()? {
                return Ok(filled);
            }
        }
    }

    /// Refill the (drained) output staging buffer.  Returns `false` once the
    /// reader is exhausted and the context has nothing left to emit.
    fn decode_more(&mut self) -> Result<bool> {
        self.output.reset();
        loop {
            if self.input.is_drained() && !self.needs_drain {
                if self.eof || !self.refill()? {
                    return Ok(false);
                }
            }
            let step = self
                .ctx
                .decompress_step(self.output.spare_mut(), self.input.unconsumed())?;
            self.input.consume(step.consumed);
            self.output.commit(step.produced);
            self.needs_drain = self.output.is_full();
            if step.consumed > 0 || step.produced > 0 {
                self.frame_complete = step.hint == 0;
            }
            if step.produced > 0 {
                return Ok(true);
            }
        }
    }

    /// Pull the next chunk from the reader.  `false` at end of data.
    fn refill(&mut self) -> Result<bool> {
        let reader = self.inner.as_mut().ok_or(Error::StreamClosed)?;
        let n = self.input.refill_from(reader)?;
        if n > 0 {
            self.total_in += n as u64;
            return Ok(true);
        }
        self.eof = true;
        if !self.frame_complete {
            crate::displaylevel!(
                2,
                "zstd: compressed stream ended in the middle of a frame\n"
            );
        }
        Ok(false)
    }

    fn release(&mut self) {
        self.ctx.release();
        self.input = BufferCursor::with_capacity(0);
        self.output = BufferCursor::with_capacity(0);
        self.needs_drain = false;
        self.state = DecoderState::Closed;
    }
}

impl<R: Read> Read for StreamDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_into(buf).map_err(io::Error::from)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
