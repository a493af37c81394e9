use licensegen::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// In-memory FileSystem that records every path it is asked about
#[derive(Default)]
pub struct InMemoryFileSystem {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    probed: Mutex<Vec<PathBuf>>,
}

impl InMemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file and all of its ancestor directories
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self = self.with_directory(parent);
        }
        self.files.insert(path, content.to_string());
        self
    }

    /// Adds a directory and all of its ancestors
    pub fn with_directory(mut self, path: impl AsRef<Path>) -> Self {
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.directories.insert(ancestor.to_path_buf());
        }
        self
    }

    /// Paths passed to `exists` or `read_to_string`, in call order
    pub fn probed_paths(&self) -> Vec<PathBuf> {
        self.probed.lock().unwrap().clone()
    }

    fn probe(&self, path: &Path) {
        self.probed.lock().unwrap().push(path.to_path_buf());
    }
}

impl FileSystem for InMemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.probe(path);
        self.files.contains_key(path) || self.directories.contains(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.directories.contains(path)
    }

    fn directory_contents(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !self.directories.contains(path) {
            anyhow::bail!("No such directory: {}", path.display());
        }
        let children = self
            .directories
            .iter()
            .chain(self.files.keys())
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        Ok(children)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.probe(path);
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No such file: {}", path.display()))
    }
}
