//! Decompression-side dictionary (`ZSTD_DDict`).

use core::fmt;

use zstd::zstd_safe::DDict;

use crate::dict::dictionary_id;
use crate::error::{Error, Result};

/// Digested dictionary for decoding frames produced with the matching
/// [`CompressionDictionary`](crate::dict::CompressionDictionary).
/// Read-only and `Send + Sync`; share with `Arc`.
pub struct DecompressionDictionary {
    raw: DDict<'static>,
    id: u32,
    len: usize,
}

impl DecompressionDictionary {
    pub fn new(dict: &[u8]) -> Result<Self> {
        let raw = DDict::try_create(dict).ok_or(Error::DictionaryBuildFailed)?;
        Ok(DecompressionDictionary {
            raw,
            id: dictionary_id(dict),
            len: dict.len(),
        })
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn content_len(&self) -> usize {
        self.len
    }

    pub(crate) fn raw(&self) -> &DDict<'static> {
        &self.raw
    }
}

impl fmt::Debug for DecompressionDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecompressionDictionary")
            .field("id", &self.id)
            .field("len", &self.len)
            .finish()
    }
}
