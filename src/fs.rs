//! # Directory Access
//!
//! The initializer only needs one thing from the filesystem up front: the log
//! directory must exist. That need is expressed as [`DirectoryCreator`] so
//! startup failures can be exercised in tests without an unwritable disk.

use std::io;
use std::path::Path;

/// Makes sure a directory exists.
pub trait DirectoryCreator: Send + Sync {
    /// Create `path` and any missing parents. Succeeds when it already exists.
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;
}

/// Directory creation through the operating system.
///
/// `std::fs::create_dir_all` already maps onto the native call on each
/// platform, so one implementation covers every target.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsDirectories;

impl DirectoryCreator for OsDirectories {
    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        if path.is_dir() {
            return Ok(());
        }
        // A regular file in the way makes create_dir_all fail, which is what we want
        std::fs::create_dir_all(path)
    }
}
