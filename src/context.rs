//! Owned compression and decompression contexts.
//!
//! Each context wraps exactly one libzstd `ZSTD_CCtx` / `ZSTD_DCtx` and is
//! the unit of working memory for one logical operation or one open stream.
//! Contexts are move-only; [`release`](CompressionContext::release) frees the
//! native state and may be called any number of times, and `Drop` releases
//! whatever is still held.  Using a released context fails with
//! [`Error::ContextReleased`] instead of touching freed memory.
//!
//! A dictionary attached with `begin_stream` is held by the context as an
//! `Arc` for as long as the native state may reference it.
//!
//! Transform steps report their progress as a [`Step`]: how many input bytes
//! were consumed, how many output bytes were produced, and libzstd's hint
//! (bytes still to flush for flush/end, `0` at end of frame for decoding).
//! Callers move their own cursors by those amounts; a step never assumes a
//! 1:1 relation between input and output progress.

use std::sync::Arc;

use zstd::zstd_safe::{self, CCtx, CParameter, DCtx, InBuffer, OutBuffer, ResetDirective};

use crate::dict::{CompressionDictionary, DecompressionDictionary};
use crate::error::{Error, Result};
use crate::level::CompressionLevel;

/// Progress of one incremental transform step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    /// Input bytes consumed by the step.
    pub consumed: usize,
    /// Output bytes written by the step.
    pub produced: usize,
    /// libzstd return value: remaining-to-flush or next-input hint.
    pub hint: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// CompressionContext
// ─────────────────────────────────────────────────────────────────────────────

/// Owner of one `ZSTD_CCtx`.
pub struct CompressionContext {
    cctx: Option<CCtx<'static>>,
    /// Referenced by `cctx`; declared after it so it is dropped last.
    dictionary: Option<Arc<CompressionDictionary>>,
}

impl CompressionContext {
    /// Allocate a fresh context.
    pub fn create() -> Result<Self> {
        let cctx = CCtx::try_create().ok_or(Error::ContextCreationFailed)?;
        Ok(CompressionContext {
            cctx: Some(cctx),
            dictionary: None,
        })
    }

    /// Free the native state.  Idempotent.
    pub fn release(&mut self) {
        self.cctx = None;
        self.dictionary = None;
    }

    /// Dictionary attached by the last [`begin_stream`](Self::begin_stream).
    pub fn dictionary(&self) -> Option<&Arc<CompressionDictionary>> {
        self.dictionary.as_ref()
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.cctx.is_none()
    }

    fn raw(&mut self) -> Result<&mut CCtx<'static>> {
        self.cctx.as_mut().ok_or(Error::ContextReleased)
    }

    /// One-shot compression of `src` into `dst` (`ZSTD_compressCCtx`).
    pub fn compress(&mut self, dst: &mut [u8], src: &[u8], level: CompressionLevel) -> Result<usize> {
        self.raw()?
            .compress(dst, src, level.get())
            .map_err(|code| Error::transform("compress", code))
    }

    /// One-shot compression bound to a pre-digested dictionary.
    ///
    /// The frame records its content size and carries a content checksum, so
    /// decoding with the wrong dictionary is detected instead of yielding
    /// garbage of the right length.  The dictionary reference is dropped from
    /// the context before returning; if that fails the context is released.
    pub fn compress_using_dictionary(
        &mut self,
        dst: &mut [u8],
        src: &[u8],
        dict: &CompressionDictionary,
    ) -> Result<usize> {
        let cctx = self.raw()?;
        cctx.reset(ResetDirective::SessionAndParameters)
            .map_err(|code| Error::transform("reset", code))?;
        cctx.set_parameter(CParameter::ChecksumFlag(true))
            .map_err(|code| Error::transform("set_parameter", code))?;
        cctx.ref_cdict(dict.raw())
            .map_err(|code| Error::transform("ref_cdict", code))?;
        let result = cctx
            .compress2(dst, src)
            .map_err(|code| Error::transform("compress_using_cdict", code));
        if cctx.reset(ResetDirective::SessionAndParameters).is_ok() {
            self.dictionary = None;
        } else {
            self.release();
        }
        result
    }

    /// Prepare the context for a new streamed frame.
    ///
    /// The context keeps `dict` alive until it is released or begun again.
    pub fn begin_stream(
        &mut self,
        level: CompressionLevel,
        dict: Option<Arc<CompressionDictionary>>,
    ) -> Result<()> {
        let cctx = self.raw()?;
        cctx.reset(ResetDirective::SessionAndParameters)
            .map_err(|code| Error::transform("reset", code))?;
        cctx.set_parameter(CParameter::CompressionLevel(level.get()))
            .map_err(|code| Error::transform("set_parameter", code))?;
        if let Some(dict) = &dict {
            cctx.ref_cdict(dict.raw())
                .map_err(|code| Error::transform("ref_cdict", code))?;
        }
        self.dictionary = dict;
        Ok(())
    }

    /// Feed `input`, writing whatever the context emits into `output`.
    pub fn compress_step(&mut self, output: &mut [u8], input: &[u8]) -> Result<Step> {
        let cctx = self.raw()?;
        let mut out = OutBuffer::around(output);
        let mut inp = InBuffer::around(input);
        let hint = cctx
            .compress_stream(&mut out, &mut inp)
            .map_err(|code| Error::transform("compress_stream", code))?;
        Ok(Step {
            consumed: inp.pos(),
            produced: out.pos(),
            hint,
        })
    }

    /// Emit buffered data without ending the frame.  `hint == 0` once the
    /// context holds nothing more.
    pub fn flush_step(&mut self, output: &mut [u8]) -> Result<Step> {
        let cctx = self.raw()?;
        let mut out = OutBuffer::around(output);
        let hint = cctx
            .flush_stream(&mut out)
            .map_err(|code| Error::transform("flush_stream", code))?;
        Ok(Step {
            consumed: 0,
            produced: out.pos(),
            hint,
        })
    }

    /// Emit the frame epilogue.  `hint == 0` once the frame is complete.
    pub fn end_step(&mut self, output: &mut [u8]) -> Result<Step> {
        let cctx = self.raw()?;
        let mut out = OutBuffer::around(output);
        let hint = cctx
            .end_stream(&mut out)
            .map_err(|code| Error::transform("end_stream", code))?;
        Ok(Step {
            consumed: 0,
            produced: out.pos(),
            hint,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DecompressionContext
// ─────────────────────────────────────────────────────────────────────────────

/// Owner of one `ZSTD_DCtx`.
pub struct DecompressionContext {
    dctx: Option<DCtx<'static>>,
    /// Referenced by `dctx`; declared after it so it is dropped last.
    dictionary: Option<Arc<DecompressionDictionary>>,
}

impl DecompressionContext {
    /// Allocate a fresh context.
    pub fn create() -> Result<Self> {
        let dctx = DCtx::try_create().ok_or(Error::ContextCreationFailed)?;
        Ok(DecompressionContext {
            dctx: Some(dctx),
            dictionary: None,
        })
    }

    /// Free the native state.  Idempotent.
    pub fn release(&mut self) {
        self.dctx = None;
        self.dictionary = None;
    }

    pub fn dictionary(&self) -> Option<&Arc<DecompressionDictionary>> {
        self.dictionary.as_ref()
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.dctx.is_none()
    }

    fn raw(&mut self) -> Result<&mut DCtx<'static>> {
        self.dctx.as_mut().ok_or(Error::ContextReleased)
    }

    /// One-shot decompression of every frame in `src` (`ZSTD_decompressDCtx`).
    pub fn decompress(&mut self, dst: &mut [u8], src: &[u8]) -> Result<usize> {
        self.raw()?
            .decompress(dst, src)
            .map_err(|code| Error::transform("decompress", code))
    }

    /// One-shot decompression with a pre-digested dictionary.
    pub fn decompress_using_dictionary(
        &mut self,
        dst: &mut [u8],
        src: &[u8],
        dict: &DecompressionDictionary,
    ) -> Result<usize> {
        self.raw()?
            .decompress_using_ddict(dst, src, dict.raw())
            .map_err(|code| Error::transform("decompress_using_ddict", code))
    }

    /// Prepare the context for a new stream, optionally referencing `dict`,
    /// which the context then keeps alive.
    pub fn begin_stream(&mut self, dict: Option<Arc<DecompressionDictionary>>) -> Result<()> {
        let dctx = self.raw()?;
        dctx.reset(ResetDirective::SessionAndParameters)
            .map_err(|code| Error::transform("reset", code))?;
        if let Some(dict) = &dict {
            dctx.ref_ddict(dict.raw())
                .map_err(|code| Error::transform("ref_ddict", code))?;
        }
        self.dictionary = dict;
        Ok(())
    }

    /// Decode from `input` into `output`.  `hint == 0` means a frame was
    /// completed and fully flushed by this step.
    pub fn decompress_step(&mut self, output: &mut [u8], input: &[u8]) -> Result<Step> {
        let dctx = self.raw()?;
        let mut out = OutBuffer::around(output);
        let mut inp = InBuffer::around(input);
        let hint = dctx
            .decompress_stream(&mut out, &mut inp)
            .map_err(|code| Error::transform("decompress_stream", code))?;
        Ok(Step {
            consumed: inp.pos(),
            produced: out.pos(),
            hint,
        })
    }
}

/// Worst-case compressed size for `len` input bytes (`ZSTD_compressBound`).
#[inline]
pub fn compress_bound(len: usize) -> usize {
    zstd_safe::compress_bound(len)
}
