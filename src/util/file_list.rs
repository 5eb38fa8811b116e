//! Input list construction with optional recursive directory expansion.
//!
//! Symlinks are never followed while walking: `walkdir` runs with
//! `follow_links(false)`, so link entries are not regular files and are left
//! out.  A symlink named directly on the command line is kept as given.

use std::io;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::displaylevel;

/// Expand `inputs` into a flat list of files.
///
/// With `recursive`, directories are walked and every regular file inside is
/// returned in walk order.  Without it, directories are skipped with a
/// warning.  Other paths pass through unchanged, existing or not; opening
/// them reports the error later.
pub fn expand_inputs(inputs: &[PathBuf], recursive: bool) -> io::Result<Vec<PathBuf>> {
    let mut result = Vec::with_capacity(inputs.len());
    for input in inputs {
        if !input.is_dir() {
            result.push(input.clone());
            continue;
        }
        if !recursive {
            displaylevel!(2, "zstd: {} is a directory -- ignored\n", input.display());
            continue;
        }
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.map_err(|e| match e.io_error() {
                Some(inner) => io::Error::new(inner.kind(), e.to_string()),
                None => io::Error::other(e.to_string()),
            })?;
            if entry.file_type().is_file() {
                result.push(entry.into_path());
            }
        }
    }
    Ok(result)
}
