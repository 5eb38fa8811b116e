//! Incremental compression and decompression over `std::io` streams.
//!
//! - [`StreamEncoder`]: frame compressor wrapping a `W: Write`
//! - [`StreamDecoder`]: frame decompressor wrapping an `R: Read`
//! - [`copy_encode`] / [`copy_decode`]: pump a whole reader through one of them

pub mod decoder;
pub mod encoder;
pub mod state;

pub use decoder::StreamDecoder;
pub use encoder::StreamEncoder;
pub use state::{DecoderState, EncoderState};

use std::io::{Read, Write};

use crate::buffer::BufferCursor;
use crate::config::{cstream_in_size, dstream_out_size, CompressionConfig, DecompressionConfig};
use crate::error::Result;

/// Compress everything `src` yields into one frame written to `dst`.
///
/// Returns the number of uncompressed bytes read and the writer.
pub fn copy_encode<R: Read, W: Write>(
    mut src: R,
    dst: W,
    config: &CompressionConfig,
) -> Result<(u64, W)> {
    let mut enc = StreamEncoder::open(dst, config)?;
    let mut chunk = BufferCursor::with_capacity(cstream_in_size());
    let mut total = 0u64;
    while chunk.refill_from(&mut src)? > 0 {
        enc.write(chunk.unconsumed())?;
        total += chunk.size() as u64;
    }
    Ok((total, enc.finish()?))
}

/// Decompress every frame `src` yields into `dst`.
///
/// Returns the number of decompressed bytes written.  Empty input is
/// [`Error::NotAZstdFrame`](crate::Error::NotAZstdFrame); input that ends in
/// the middle of a frame is [`Error::Truncated`](crate::Error::Truncated).
pub fn copy_decode<R: Read, W: Write>(
    src: R,
    dst: &mut W,
    config: &DecompressionConfig,
) -> Result<u64> {
    let mut dec = StreamDecoder::open(src, config)?;
    let mut chunk = vec![0u8; dstream_out_size()];
    let mut total = 0u64;
    loop {
        let n = dec.read_into(&mut chunk)?;
        if n == 0 {
            break;
        }
        dst.write_all(&chunk[..n])?;
        total += n as u64;
    }
    if dec.total_in() == 0 {
        return Err(crate::Error::NotAZstdFrame);
    }
    if !dec.is_frame_complete() {
        return Err(crate::Error::Truncated {
            produced: total as usize,
        });
    }
    dst.flush()?;
    Ok(total)
}
