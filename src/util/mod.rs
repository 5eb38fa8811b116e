//! Filesystem helpers for the command-line tool.
//!
//! - [`file_list`]  : expand files and directories into a flat input list
//! - [`file_status`]: regular-file checks, copying mtime and permissions
//! - output-name derivation for the `.zst` suffix (this module)

pub mod file_list;
pub mod file_status;

pub use file_list::expand_inputs;
pub use file_status::{copy_file_stat, is_directory, is_reg_file};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::ZSTD_EXTENSION;

/// Logical CPU count, at least 1.
pub fn count_cores() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// `FILE` -> `FILE.zst`.
pub fn compressed_name(src: &Path) -> PathBuf {
    let mut name = OsString::from(src.as_os_str());
    name.push(ZSTD_EXTENSION);
    PathBuf::from(name)
}

/// `FILE.zst` -> `FILE`; `None` when `src` lacks the suffix or is nothing
/// but the suffix.
pub fn decompressed_name(src: &Path) -> Option<PathBuf> {
    let s = src.to_str()?;
    let stem = s.strip_suffix(ZSTD_EXTENSION)?;
    if stem.is_empty() || stem.ends_with(std::path::MAIN_SEPARATOR) {
        return None;
    }
    Some(PathBuf::from(stem))
}
