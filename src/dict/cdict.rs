//! Compression-side dictionary.
//!
//! [`CompressionDictionary`] owns a `ZSTD_CDict`: the dictionary content
//! copied into libzstd and pre-digested for one compression level, so that
//! every frame compressed with it skips the dictionary loading cost.
//!
//! # Thread safety
//! The digested state is read-only after creation.  Share it between
//! threads and streams with `Arc<CompressionDictionary>`.

use core::fmt;

use zstd::zstd_safe::CDict;

use crate::dict::dictionary_id;
use crate::error::{Error, Result};
use crate::level::CompressionLevel;

// ─────────────────────────────────────────────────────────────────────────────
// CompressionDictionary
// ─────────────────────────────────────────────────────────────────────────────

pub struct CompressionDictionary {
    raw: CDict<'static>,
    level: CompressionLevel,
    id: u32,
    len: usize,
}

impl CompressionDictionary {
    /// Digest `dict` for compression at `level`.
    ///
    /// Raw bytes are used as plain content; a buffer starting with the
    /// dictionary magic is loaded as a structured dictionary and must be
    /// well-formed, otherwise [`Error::DictionaryBuildFailed`].
    pub fn new(dict: &[u8], level: CompressionLevel) -> Result<Self> {
        let raw = CDict::try_create(dict, level.get()).ok_or(Error::DictionaryBuildFailed)?;
        Ok(CompressionDictionary {
            raw,
            level,
            id: dictionary_id(dict),
            len: dict.len(),
        })
    }

    /// Dictionary ID written into frame headers; `0` for raw content.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Level the dictionary was digested for.  Frames compressed with it use
    /// this level.
    #[inline]
    pub fn level(&self) -> CompressionLevel {
        self.level
    }

    /// Length of the source dictionary bytes.
    #[inline]
    pub fn content_len(&self) -> usize {
        self.len
    }

    pub(crate) fn raw(&self) -> &CDict<'static> {
        &self.raw
    }
}

impl fmt::Debug for CompressionDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressionDictionary")
            .field("id", &self.id)
            .field("level", &self.level)
            .field("len", &self.len)
            .finish()
    }
}
