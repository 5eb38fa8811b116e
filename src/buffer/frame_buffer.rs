//! Owned result buffer for one-shot compress/decompress calls.

use core::fmt;
use core::ops::Deref;

/// A byte buffer whose logical length is tracked apart from its writable
/// capacity.
///
/// The one-shot entry points allocate a `FrameBuffer` at a bound (or a
/// declared content size), let the transform write into
/// [`spare_mut`](FrameBuffer::spare_mut), record progress with
/// [`advance`](FrameBuffer::advance) and finally
/// [`truncate`](FrameBuffer::truncate) to what was produced.  Growing with
/// [`ensure_capacity`](FrameBuffer::ensure_capacity) keeps existing content
/// and extends in place whenever the allocator allows.
#[derive(Clone, Default)]
pub struct FrameBuffer {
    /// Writable storage; `data.len()` is the capacity, always initialised.
    data: Vec<u8>,
    /// Logical length, `len <= data.len()`.
    len: usize,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with `capacity` zeroed writable bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        FrameBuffer {
            data: vec![0u8; capacity],
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Writable bytes currently available, including the logical content.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Make sure at least `capacity` writable bytes exist.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        if capacity > self.data.len() {
            self.data.resize(capacity, 0);
        }
    }

    /// Add `additional` writable bytes past the current capacity.
    pub fn grow_by(&mut self, additional: usize) {
        let target = self.data.len() + additional;
        self.data.resize(target, 0);
    }

    /// Writable region past the logical end.
    #[inline]
    pub fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.len..]
    }

    /// Extend the logical length by `n` bytes written into the spare region.
    ///
    /// # Panics
    /// If `n` exceeds the spare region.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        assert!(self.len + n <= self.data.len(), "advance past capacity");
        self.len += n;
    }

    /// Shorten to at most `len` bytes and release the capacity past the
    /// logical end.
    pub fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
        self.data.truncate(self.len);
        self.data.shrink_to_fit();
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Consume into a `Vec<u8>` holding exactly the logical content.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.data.truncate(self.len);
        self.data
    }

    /// Copy of the content followed by a single `0` byte, for callers that
    /// pass the result on as a C string.  The logical length is unaffected.
    pub fn to_nul_terminated(&self) -> Vec<u8> {
        let mut v = Vec::with_capacity(self.len + 1);
        v.extend_from_slice(self.as_slice());
        v.push(0);
        v
    }
}

impl From<Vec<u8>> for FrameBuffer {
    fn from(data: Vec<u8>) -> Self {
        let len = data.len();
        FrameBuffer { data, len }
    }
}

impl From<FrameBuffer> for Vec<u8> {
    fn from(buf: FrameBuffer) -> Self {
        buf.into_vec()
    }
}

impl Deref for FrameBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for FrameBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl PartialEq for FrameBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for FrameBuffer {}

impl PartialEq<[u8]> for FrameBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<&[u8]> for FrameBuffer {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_slice() == *other
    }
}

impl PartialEq<Vec<u8>> for FrameBuffer {
    fn eq(&self, other: &Vec<u8>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("len", &self.len)
            .field("capacity", &self.data.len())
            .finish()
    }
}
