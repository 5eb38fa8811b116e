// config.rs: compile-time defaults and runtime configuration surfaces.
//
// The only tunables callers get are the compression level, an optional
// dictionary and, for streams, the input strategy.  Everything else
// (window log, workers, long-distance matching) stays at libzstd defaults.

use std::sync::Arc;

use zstd::zstd_safe;

use crate::dict::{CompressionDictionary, DecompressionDictionary};
use crate::error::Result;
use crate::level::{CompressionLevel, LevelPolicy};

// Default compression level.  Can be overridden by the ZSTD_CLEVEL
// environment variable in the CLI, or by -# on the command line.
pub const DEFAULT_LEVEL: i32 = 3;

// Smallest "regular" level advertised to callers.  Negative fast levels
// below this are accepted by the modern policy only.
pub const MIN_LEVEL: i32 = 1;

// Name of the environment variable holding the CLI default level.
pub const CLEVEL_ENV: &str = "ZSTD_CLEVEL";

// Suffix appended to compressed file names.
pub const ZSTD_EXTENSION: &str = ".zst";

// Optional scheme accepted in front of paths by the path opener, matched
// case-insensitively and optionally followed by "://".
pub const STREAM_NAME: &str = "compress.zstd";

/// Recommended input chunk for the compression stream (`ZSTD_CStreamInSize`).
#[inline]
pub fn cstream_in_size() -> usize {
    zstd_safe::CCtx::in_size()
}

/// Recommended output staging size for compression (`ZSTD_CStreamOutSize`).
#[inline]
pub fn cstream_out_size() -> usize {
    zstd_safe::CCtx::out_size()
}

/// Recommended input staging size for decompression (`ZSTD_DStreamInSize`).
#[inline]
pub fn dstream_in_size() -> usize {
    zstd_safe::DCtx::in_size()
}

/// Output staging size for decompression and the growth increment of the
/// unknown-size decode loop (`ZSTD_DStreamOutSize`).
#[inline]
pub fn dstream_out_size() -> usize {
    zstd_safe::DCtx::out_size()
}

// ─────────────────────────────────────────────────────────────────────────────
// Stream configuration
// ─────────────────────────────────────────────────────────────────────────────

/// How a compression stream feeds caller bytes to the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeStrategy {
    /// Hand every `write` slice straight to the context.
    #[default]
    Direct,
    /// Accumulate into a fixed `cstream_in_size()` staging buffer and run the
    /// context only when it is full (or on flush/close).
    Staged,
}

/// Settings for a compression stream or one-shot dictionary compression.
#[derive(Clone, Default)]
pub struct CompressionConfig {
    /// Requested level; validated against `policy` when the stream opens.
    pub level: i32,
    /// Level validation policy.
    pub policy: LevelPolicy,
    /// Shared compression dictionary, if any.
    pub dictionary: Option<Arc<CompressionDictionary>>,
    /// Input buffering strategy.
    pub strategy: EncodeStrategy,
}

impl CompressionConfig {
    /// Default level, modern policy, no dictionary, direct strategy.
    pub fn new() -> Self {
        CompressionConfig {
            level: DEFAULT_LEVEL,
            ..Default::default()
        }
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn with_policy(mut self, policy: LevelPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_strategy(mut self, strategy: EncodeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Attach an already built dictionary.
    pub fn with_dictionary(mut self, dictionary: Arc<CompressionDictionary>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Build a dictionary from raw bytes at the configured level and attach it.
    ///
    /// Call after [`with_level`](Self::with_level): the dictionary is digested
    /// for the level in effect at this point.
    pub fn with_dictionary_bytes(mut self, dict: &[u8]) -> Result<Self> {
        let level = CompressionLevel::for_stream(self.level, self.policy)?;
        self.dictionary = Some(Arc::new(CompressionDictionary::new(dict, level)?));
        Ok(self)
    }
}

impl std::fmt::Debug for CompressionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressionConfig")
            .field("level", &self.level)
            .field("policy", &self.policy)
            .field("dictionary", &self.dictionary.as_ref().map(|d| d.id()))
            .field("strategy", &self.strategy)
            .finish()
    }
}

/// Settings for a decompression stream.
#[derive(Clone, Default)]
pub struct DecompressionConfig {
    /// Shared decompression dictionary, if any.
    pub dictionary: Option<Arc<DecompressionDictionary>>,
}

impl DecompressionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dictionary(mut self, dictionary: Arc<DecompressionDictionary>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    pub fn with_dictionary_bytes(mut self, dict: &[u8]) -> Result<Self> {
        self.dictionary = Some(Arc::new(DecompressionDictionary::new(dict)?));
        Ok(self)
    }
}

impl std::fmt::Debug for DecompressionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecompressionConfig")
            .field("dictionary", &self.dictionary.as_ref().map(|d| d.id()))
            .finish()
    }
}
