//! File status helpers: type checks and copying timestamps and permissions
//! from a source file onto the file produced from it.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use filetime::FileTime;

/// `true` if `path` is a regular file (symlinks are resolved).
pub fn is_reg_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// `true` if `path` is a directory (symlinks are resolved).
pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// Give `dst` the modification time and permission bits of `src`.
///
/// The access time of `dst` is set to now.  Fails if `dst` is not a regular
/// file.
pub fn copy_file_stat(src: &Path, dst: &Path) -> io::Result<()> {
    if !is_reg_file(dst) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "copy_file_stat: destination is not a regular file",
        ));
    }
    let meta = fs::metadata(src)?;
    let atime = FileTime::from_system_time(SystemTime::now());
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_times(dst, atime, mtime)?;
    fs::set_permissions(dst, meta.permissions())?;
    Ok(())
}
