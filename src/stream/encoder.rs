//! Streaming compressor over any `W: Write`.
//!
//! Bytes handed to [`StreamEncoder::write`] are fed to an open compression
//! context; everything the context emits is forwarded to the backing writer
//! before `write` returns.  The frame stays open across calls until
//! [`close`](StreamEncoder::close) or [`finish`](StreamEncoder::finish)
//! writes the epilogue.
//!
//! Two input strategies share this type (see [`EncodeStrategy`]):
//! `Direct` passes each caller slice straight to the context, `Staged`
//! collects caller bytes into a `cstream_in_size()` buffer first and only
//! compresses full buffers (plus whatever is left on flush/close).  Both
//! produce valid frames for the same input; only the block boundaries differ.

use std::io::{self, Write};

use crate::buffer::BufferCursor;
use crate::config::{cstream_in_size, cstream_out_size, CompressionConfig, EncodeStrategy};
use crate::context::CompressionContext;
use crate::error::{Error, Result};
use crate::level::CompressionLevel;
use crate::stream::state::EncoderState;

// ─────────────────────────────────────────────────────────────────────────────
// StreamEncoder<W>
// ─────────────────────────────────────────────────────────────────────────────

/// Streaming frame compressor backed by a writer.
///
/// # Usage
/// ```no_run
/// use std::io::Write;
/// use zstdr::{CompressionConfig, StreamEncoder};
///
/// let mut enc = StreamEncoder::open(Vec::new(), &CompressionConfig::new()).unwrap();
/// enc.write_all(b"hello").unwrap();
/// let frame = enc.finish().unwrap();
/// ```
pub struct StreamEncoder<W: Write> {
    /// Owns the attached dictionary, if any.
    ctx: CompressionContext,
    /// Backing writer; `None` once closed or handed back by `finish`.
    inner: Option<W>,
    /// Output staging, `cstream_out_size()` bytes.
    out: BufferCursor,
    /// Input staging for [`EncodeStrategy::Staged`].
    staged: Option<BufferCursor>,
    level: CompressionLevel,
    state: EncoderState,
}

impl<W: Write> StreamEncoder<W> {
    /// Open a frame on `writer`.
    ///
    /// A level above the maximum is clamped with a warning; a level below the
    /// policy minimum fails.  When `config` carries a dictionary, frames use
    /// the level the dictionary was digested for.
    pub fn open(writer: W, config: &CompressionConfig) -> Result<Self> {
        let level = CompressionLevel::for_stream(config.level, config.policy)?;
        let mut ctx = CompressionContext::create()?;
        ctx.begin_stream(level, config.dictionary.clone())?;

        let staged = match config.strategy {
            EncodeStrategy::Direct => None,
            EncodeStrategy::Staged => Some(BufferCursor::with_capacity(cstream_in_size())),
        };
        let level = config.dictionary.as_ref().map_or(level, |d| d.level());

        Ok(StreamEncoder {
            ctx,
            inner: Some(writer),
            out: BufferCursor::with_capacity(cstream_out_size()),
            staged,
            level,
            state: EncoderState::Accumulating,
        })
    }

    /// Compress all of `bytes`, forwarding produced output to the writer.
    ///
    /// Returns `bytes.len()`.  Any failure moves the stream to
    /// [`EncoderState::Failed`].
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        self.state.ensure_writable()?;
        let result = if self.staged.is_some() {
            self.compress_staged(bytes)
        } else {
            self.compress_direct(bytes)
        };
        self.track(result).map(|()| bytes.len())
    }

    /// Push everything buffered so far to the writer without ending the
    /// frame.  Calling it again with nothing pending writes nothing.
    pub fn flush(&mut self) -> Result<()> {
        self.state.ensure_writable()?;
        let result = self.flush_frame();
        self.track(result)
    }

    /// End the frame, release the context and buffers and drop the writer.
    ///
    /// On a failed stream nothing more is written; resources are still
    /// released and `Ok` is returned.  Calling `close` twice fails with
    /// [`Error::StreamClosed`].
    pub fn close(&mut self) -> Result<()> {
        let result = self.shutdown();
        self.inner = None;
        result
    }

    /// [`close`](Self::close), but hand the writer back.
    pub fn finish(mut self) -> Result<W> {
        self.shutdown()?;
        self.inner.take().ok_or(Error::StreamClosed)
    }

    #[inline]
    pub fn state(&self) -> EncoderState {
        self.state
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == EncoderState::Closed
    }

    /// Level frames are compressed at.
    #[inline]
    pub fn level(&self) -> CompressionLevel {
        self.level
    }

    /// ID of the attached dictionary, if any.
    pub fn dictionary_id(&self) -> Option<u32> {
        self.ctx.dictionary().map(|d| d.id())
    }

    pub fn strategy(&self) -> EncodeStrategy {
        match self.staged {
            Some(_) => EncodeStrategy::Staged,
            None => EncodeStrategy::Direct,
        }
    }

    /// The backing writer, while the stream is open.
    pub fn get_ref(&self) -> Option<&W> {
        self.inner.as_ref()
    }

    // ── internals ───────────────────────────────────────────────────────────

    fn compress_direct(&mut self, bytes: &[u8]) -> Result<()> {
        let sink = self.inner.as_mut().ok_or(Error::StreamClosed)?;
        pump(&mut self.ctx, &mut self.out, sink, bytes)
    }

    fn compress_staged(&mut self, bytes: &[u8]) -> Result<()> {
        let mut taken = 0;
        while taken < bytes.len() {
            let Some(staged) = self.staged.as_mut() else {
                return self.compress_direct(&bytes[taken..]);
            };
            taken += staged.push_from(&bytes[taken..]);
            if staged.is_full() {
                self.drain_staged()?;
            }
        }
        Ok(())
    }

    /// Compress whatever sits in the input staging buffer.
    fn drain_staged(&mut self) -> Result<()> {
        let Some(staged) = self.staged.as_mut() else {
            return Ok(());
        };
        if staged.is_drained() {
            return Ok(());
        }
        let sink = self.inner.as_mut().ok_or(Error::StreamClosed)?;
        pump(&mut self.ctx, &mut self.out, sink, staged.unconsumed())?;
        staged.reset();
        Ok(())
    }

    fn flush_frame(&mut self) -> Result<()> {
        self.drain_staged()?;
        let sink = self.inner.as_mut().ok_or(Error::StreamClosed)?;
        loop {
            let step = self.ctx.flush_step(self.out.spare_mut())?;
            self.out.commit(step.produced);
            forward(&mut self.out, sink)?;
            if step.hint == 0 {
                break;
            }
        }
        sink.flush()?;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.drain_staged()?;
        let sink = self.inner.as_mut().ok_or(Error::StreamClosed)?;
        loop {
            let step = self.ctx.end_step(self.out.spare_mut())?;
            self.out.commit(step.produced);
            forward(&mut self.out, sink)?;
            if step.hint == 0 {
                break;
            }
        }
        sink.flush()?;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        let result = match self.state {
            EncoderState::Closed => return Err(Error::StreamClosed),
            EncoderState::Failed => Ok(()),
            EncoderState::Accumulating => self.end_frame(),
        };
        if let Err(e) = &result {
            crate::displaylevel!(1, "zstd: failed to end frame: {}\n", e);
        }
        self.release();
        result
    }

    fn release(&mut self) {
        self.ctx.release();
        self.out = BufferCursor::with_capacity(0);
        self.staged = None;
        self.state = EncoderState::Closed;
    }

    fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            crate::displaylevel!(1, "zstd: compression stream failed: {}\n", e);
            self.state = EncoderState::Failed;
        }
        result
    }
}

/// Feed all of `input` to `ctx`, forwarding every produced byte to `sink`.
fn pump<W: Write + ?Sized>(
    ctx: &mut CompressionContext,
    out: &mut BufferCursor,
    sink: &mut W,
    input: &[u8],
) -> Result<()> {
    let mut consumed = 0;
    while consumed < input.len() {
        let step = ctx.compress_step(out.spare_mut(), &input[consumed..])?;
        consumed += step.consumed;
        out.commit(step.produced);
        forward(out, sink)?;
    }
    Ok(())
}

/// Write the unconsumed part of `out` to `sink` and empty it.
fn forward<W: Write + ?Sized>(out: &mut BufferCursor, sink: &mut W) -> Result<()> {
    if !out.is_drained() {
        sink.write_all(out.unconsumed())?;
    }
    out.reset();
    Ok(())
}

impl<W: Write> Write for StreamEncoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        StreamEncoder::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        StreamEncoder::flush(self).map_err(io::Error::from)
    }
}

impl<W: Write> Drop for StreamEncoder<W> {
    /// Best-effort end of frame for an encoder that was neither closed nor
    /// finished.  Errors are ignored; call [`StreamEncoder::finish`] to see
    /// them.
    fn drop(&mut self) {
        if self.state == EncoderState::Accumulating && self.inner.is_some() {
            let _ = self.end_frame();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
