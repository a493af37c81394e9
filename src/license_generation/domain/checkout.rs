use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Checkout value object representing one fetched dependency on disk
///
/// The name is the final path component. Identity and ordering are by name
/// (case-sensitive); `lookup_key` gives the lowercased form used to match
/// package references against checkouts.
#[derive(Debug, Clone)]
pub struct Checkout {
    path: PathBuf,
    name: String,
}

impl Checkout {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lookup_key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl PartialEq for Checkout {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Checkout {}

impl Hash for Checkout {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Checkout {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Checkout {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}
