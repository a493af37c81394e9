use std::collections::HashMap;
use std::path::PathBuf;

/// Per-library override supplied by configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseModifier {
    /// Exclude the library from the output
    Ignore,
    /// Read the license from this file instead of searching the checkout
    LicensePath(PathBuf),
}

/// Library-name keyed modifiers, consumed as each library is processed
///
/// Whatever is left after a run names libraries that were never reached,
/// which usually means a stale or misspelled configuration entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseModifiers {
    entries: HashMap<String, LicenseModifier>,
}

impl LicenseModifiers {
    pub fn new(entries: HashMap<String, LicenseModifier>) -> Self {
        Self { entries }
    }

    /// Removes and returns the modifier for `library_name`
    pub fn take(&mut self, library_name: &str) -> Option<LicenseModifier> {
        self.entries.remove(library_name)
    }

    pub fn get(&self, library_name: &str) -> Option<&LicenseModifier> {
        self.entries.get(library_name)
    }

    /// Names of entries not consumed yet, sorted
    pub fn unused_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, LicenseModifier)> for LicenseModifiers {
    fn from_iter<I: IntoIterator<Item = (String, LicenseModifier)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
