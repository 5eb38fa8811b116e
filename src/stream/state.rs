//! Lifecycle states of the stream encoder and decoder.
//!
//! ```text
//!                 write / flush                      read
//!   open ──► Accumulating ◄─┐           open ──► Reading ◄─┐
//!              │   │  └─────┘                    │  │ └─────┘
//!        error │   │ close                 error │  │ close
//!              ▼   ▼                             ▼  ▼
//!           Failed ─► Closed                 Failed ─► Closed
//!                close
//! ```
//!
//! A stream that does not exist yet is the "idle" state; there is no value
//! for it.  Once `Failed`, only close is accepted.

use crate::error::{Error, Result};

/// State of a [`StreamEncoder`](crate::stream::StreamEncoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderState {
    /// Open: accepts write, flush and close.
    Accumulating,
    /// A write, flush or backing-stream error occurred.
    Failed,
    /// Context and buffers released.
    Closed,
}

impl EncoderState {
    /// Gate for write and flush.
    #[inline]
    pub(crate) fn ensure_writable(self) -> Result<()> {
        match self {
            EncoderState::Accumulating => Ok(()),
            EncoderState::Failed => Err(Error::StreamFailed),
            EncoderState::Closed => Err(Error::StreamClosed),
        }
    }
}

/// State of a [`StreamDecoder`](crate::stream::StreamDecoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    Reading,
    Failed,
    Closed,
}

impl DecoderState {
    /// Gate for read.
    #[inline]
    pub(crate) fn ensure_readable(self) -> Result<()> {
        match self {
            DecoderState::Reading => Ok(()),
            DecoderState::Failed => Err(Error::StreamFailed),
            DecoderState::Closed => Err(Error::StreamClosed),
        }
    }
}
