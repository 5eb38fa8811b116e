//! Fixed-capacity staging buffer with consume/produce marks.
//!
//! A [`BufferCursor`] owns `capacity` bytes and tracks two marks:
//!
//! ```text
//!  0          position          size              capacity
//!  |--consumed--|---unconsumed---|------spare--------|
//! ```
//!
//! Invariant: `position <= size <= capacity`.  Producers append into the
//! spare region and [`commit`](BufferCursor::commit); consumers read the
//! unconsumed region and [`consume`](BufferCursor::consume).  The same type
//! plays the input role (bytes read from a backing stream, waiting for the
//! transform) and the output role (bytes produced by the transform, waiting
//! for the caller).

use std::io::{self, Read};

#[derive(Debug, Clone)]
pub struct BufferCursor {
    buf: Box<[u8]>,
    size: usize,
    position: usize,
}

impl BufferCursor {
    /// Allocate a zeroed cursor of `capacity` bytes, empty.
    pub fn with_capacity(capacity: usize) -> Self {
        BufferCursor {
            buf: vec![0u8; capacity].into_boxed_slice(),
            size: 0,
            position: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of valid bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of valid bytes already consumed.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Valid bytes not consumed yet.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.size - self.position
    }

    #[inline]
    pub fn is_drained(&self) -> bool {
        self.position == self.size
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.size == self.buf.len()
    }

    /// The unconsumed region `[position, size)`.
    #[inline]
    pub fn unconsumed(&self) -> &[u8] {
        &self.buf[self.position..self.size]
    }

    /// Mark `n` unconsumed bytes as consumed.
    ///
    /// # Panics
    /// If `n` exceeds [`remaining`](Self::remaining).
    #[inline]
    pub fn consume(&mut self, n: usize) {
        assert!(n <= self.remaining(), "consume past size");
        self.position += n;
    }

    /// The writable region `[size, capacity)`.
    #[inline]
    pub fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.size..]
    }

    /// Mark `n` bytes of the spare region as valid.
    ///
    /// # Panics
    /// If `n` exceeds the spare region.
    #[inline]
    pub fn commit(&mut self, n: usize) {
        assert!(self.size + n <= self.buf.len(), "commit past capacity");
        self.size += n;
    }

    /// Forget all content: `position = size = 0`.
    #[inline]
    pub fn reset(&mut self) {
        self.size = 0;
        self.position = 0;
    }

    /// Append as much of `src` as fits; returns the number of bytes taken.
    pub fn push_from(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.capacity() - self.size);
        self.spare_mut()[..n].copy_from_slice(&src[..n]);
        self.commit(n);
        n
    }

    /// Copy unconsumed bytes into `dst` (as many as fit) and consume them.
    pub fn drain_into(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.remaining());
        dst[..n].copy_from_slice(&self.buf[self.position..self.position + n]);
        self.position += n;
        n
    }

    /// Reset, then fill with one `read` from `reader`.  Returns the number of
    /// bytes read; `0` means the reader reported end of data.
    pub fn refill_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<usize> {
        self.reset();
        loop {
            match reader.read(&mut self.buf) {
                Ok(n) => {
                    self.size = n;
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
