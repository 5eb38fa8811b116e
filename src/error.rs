//! Crate-wide error type.
//!
//! Every fallible operation in the crate returns [`Result`].  Variants map
//! one-to-one onto the failure kinds callers can act upon; the libzstd error
//! code and its name are preserved for transform failures so diagnostics stay
//! comparable with the reference `zstd` tool.

use core::fmt;
use std::io;

/// Error returned by the frame codec, dictionary contexts and streams.
#[derive(Debug)]
pub enum Error {
    /// Compression level outside the range accepted by the active policy.
    InvalidLevel { level: i32, min: i32, max: i32 },
    /// libzstd could not allocate or initialise a context.
    ContextCreationFailed,
    /// A context was used after [`release`](crate::context::CompressionContext::release).
    ContextReleased,
    /// A compression or decompression dictionary could not be built.
    DictionaryBuildFailed,
    /// The input does not start with a parseable Zstandard frame header.
    NotAZstdFrame,
    /// The frame omits its content size and the operation requires it.
    UnknownDecompressedSize,
    /// The decoded length differs from the length the frame declared.
    SizeMismatch { expected: u64, actual: u64 },
    /// The header declares more content than the frame could possibly encode.
    ContentSizeTooLarge { declared: u64 },
    /// Input ended before the frame was complete.
    Truncated { produced: usize },
    /// libzstd reported an error while transforming data.
    Transform {
        /// Which step failed (`"compress"`, `"decompress_stream"`, ...).
        op: &'static str,
        /// Raw libzstd error code.
        code: usize,
        /// Name reported by `ZSTD_getErrorName`.
        name: &'static str,
    },
    /// Operation attempted on a stream that has been closed.
    StreamClosed,
    /// Operation attempted on a stream that already failed; only close is allowed.
    StreamFailed,
    /// Path opener received a mode other than `r`, `rb`, `w` or `wb`.
    InvalidMode(String),
    /// Failure reported by the backing stream.
    Io(io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Build a [`Error::Transform`] from a raw libzstd error code.
    pub(crate) fn transform(op: &'static str, code: usize) -> Self {
        Error::Transform {
            op,
            code,
            name: zstd::zstd_safe::get_error_name(code),
        }
    }

    /// Short stable identifier, used by the CLI and in tests.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Error::InvalidLevel { .. } => "invalid_level",
            Error::ContextCreationFailed => "context_creation_failed",
            Error::ContextReleased => "context_released",
            Error::DictionaryBuildFailed => "dictionary_build_failed",
            Error::NotAZstdFrame => "not_a_zstd_frame",
            Error::UnknownDecompressedSize => "unknown_decompressed_size",
            Error::SizeMismatch { .. } => "size_mismatch",
            Error::ContentSizeTooLarge { .. } => "content_size_too_large",
            Error::Truncated { .. } => "truncated",
            Error::Transform { .. } => "transform",
            Error::StreamClosed => "stream_closed",
            Error::StreamFailed => "stream_failed",
            Error::InvalidMode(_) => "invalid_mode",
            Error::Io(_) => "io",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLevel { level, min, max } => write!(
                f,
                "compression level ({level}) must be within {min}..={max}"
            ),
            Error::ContextCreationFailed => f.write_str("failed to create zstd context"),
            Error::ContextReleased => f.write_str("context has already been released"),
            Error::DictionaryBuildFailed => f.write_str("failed to build zstd dictionary"),
            Error::NotAZstdFrame => f.write_str("input was not compressed by zstd"),
            Error::UnknownDecompressedSize => {
                f.write_str("frame does not declare its decompressed size")
            }
            Error::SizeMismatch { expected, actual } => write!(
                f,
                "decompressed size mismatch: expected {expected} bytes, got {actual}"
            ),
            Error::ContentSizeTooLarge { declared } => write!(
                f,
                "frame declares {declared} bytes of content, more than it can encode"
            ),
            Error::Truncated { produced } => {
                write!(f, "frame truncated after {produced} decoded bytes")
            }
            Error::Transform { op, name, .. } => write!(f, "{op}: {name}"),
            Error::StreamClosed => f.write_str("stream is closed"),
            Error::StreamFailed => f.write_str("stream failed earlier and can only be closed"),
            Error::InvalidMode(mode) => write!(f, "invalid open mode: {mode:?}"),
            Error::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Io(inner) => inner,
            Error::StreamClosed | Error::StreamFailed => {
                io::Error::new(io::ErrorKind::BrokenPipe, e)
            }
            Error::InvalidLevel { .. } | Error::InvalidMode(_) => {
                io::Error::new(io::ErrorKind::InvalidInput, e)
            }
            Error::ContextCreationFailed | Error::DictionaryBuildFailed => {
                io::Error::new(io::ErrorKind::OutOfMemory, e)
            }
            Error::Truncated { .. } => io::Error::new(io::ErrorKind::UnexpectedEof, e),
            _ => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}
