use crate::shared::Result;
use std::path::{Path, PathBuf};

/// FileSystem port for the read-only file access the core needs
///
/// The checkout index and the license resolver only go through this port,
/// so tests can substitute an in-memory filesystem for real I/O.
pub trait FileSystem: Send + Sync {
    /// Returns true if anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Returns true if `path` exists and is a directory
    fn is_directory(&self, path: &Path) -> bool;

    /// Lists the immediate children of a directory as full paths
    ///
    /// # Errors
    /// Returns an error if the directory cannot be listed
    fn directory_contents(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Reads the full text contents of a file
    ///
    /// # Errors
    /// Returns an error if the file does not exist or is not valid UTF-8
    fn read_to_string(&self, path: &Path) -> Result<String>;
}
