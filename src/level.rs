//! Compression level validation.
//!
//! Two policies exist because libzstd changed its contract over time:
//!
//! - [`LevelPolicy::Legacy`] accepts `0..=max` and treats `0` as "use the
//!   default level"; any negative level is rejected.
//! - [`LevelPolicy::Modern`] additionally accepts the negative "fast" levels
//!   down to `ZSTD_minCLevel()`; only levels above `max` are rejected.
//!
//! The policy is a runtime choice carried by the caller's configuration,
//! never a build-time switch.  `Modern` is the default.

use zstd::zstd_safe;

use crate::config::DEFAULT_LEVEL;
use crate::error::{Error, Result};

/// Which range of levels is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelPolicy {
    /// `0..=max`, `0` meaning default.
    Legacy,
    /// `min_c_level()..=max`, `0` meaning default.
    #[default]
    Modern,
}

impl LevelPolicy {
    /// Lowest level this policy accepts.
    pub fn min(self) -> i32 {
        match self {
            LevelPolicy::Legacy => 0,
            LevelPolicy::Modern => zstd_safe::min_c_level(),
        }
    }

    /// Highest level this policy accepts (`ZSTD_maxCLevel()`).
    #[inline]
    pub fn max(self) -> i32 {
        max_level()
    }
}

/// Highest level supported by the linked libzstd.
#[inline]
pub fn max_level() -> i32 {
    zstd_safe::max_c_level()
}

/// A level that passed validation.  `0` has already been resolved to
/// [`DEFAULT_LEVEL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompressionLevel(i32);

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel(DEFAULT_LEVEL)
    }
}

impl CompressionLevel {
    /// Validate `level` under `policy`.  Out-of-range levels fail; nothing is
    /// clamped.
    pub fn new(level: i32, policy: LevelPolicy) -> Result<Self> {
        let (min, max) = (policy.min(), policy.max());
        if level < min || level > max {
            return Err(Error::InvalidLevel { level, min, max });
        }
        Ok(Self::resolve(level))
    }

    /// Validation used when opening a stream: a level above the maximum is
    /// clamped to the maximum with a warning, anything below the policy
    /// minimum still fails.
    pub fn for_stream(level: i32, policy: LevelPolicy) -> Result<Self> {
        let max = policy.max();
        if level > max {
            crate::displaylevel!(
                2,
                "zstd: compression level ({}) must be less than {}, using {}\n",
                level,
                max,
                max
            );
            return Ok(CompressionLevel(max));
        }
        Self::new(level, policy)
    }

    /// Raw level as understood by libzstd.
    #[inline]
    pub fn get(self) -> i32 {
        self.0
    }

    fn resolve(level: i32) -> Self {
        if level == 0 {
            CompressionLevel(DEFAULT_LEVEL)
        } else {
            CompressionLevel(level)
        }
    }
}

impl From<CompressionLevel> for i32 {
    fn from(level: CompressionLevel) -> i32 {
        level.0
    }
}
