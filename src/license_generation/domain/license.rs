use super::Library;
use std::cmp::Ordering;
use version_compare::Cmp;

/// License text of a library, as found on disk
#[derive(Debug, Clone)]
pub struct LicenseContent {
    pub version: Option<String>,
    pub body: String,
}

impl LicenseContent {
    pub fn new(version: Option<String>, body: String) -> Self {
        Self { version, body }
    }
}

/// License entity - pairs a collected library with its license text
///
/// Equality is by (name, version). Ordering is by name; equal names fall
/// back to version in descending numeric order, with a missing version
/// compared as the empty string (so it sorts after any versioned entry).
#[derive(Debug, Clone)]
pub struct License {
    source: Library,
    name: String,
    content: Option<LicenseContent>,
}

impl License {
    pub fn new(source: Library, name: impl Into<String>, content: Option<LicenseContent>) -> Self {
        Self {
            source,
            name: name.into(),
            content,
        }
    }

    pub fn source(&self) -> &Library {
        &self.source
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> Option<&LicenseContent> {
        self.content.as_ref()
    }

    pub fn version(&self) -> Option<&str> {
        self.content.as_ref().and_then(|c| c.version.as_deref())
    }

    pub fn body(&self) -> &str {
        self.content.as_ref().map(|c| c.body.as_str()).unwrap_or("")
    }
}

impl PartialEq for License {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.version() == other.version()
    }
}

impl Eq for License {}

impl PartialOrd for License {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for License {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name).then_with(|| {
            compare_versions(
                other.version().unwrap_or(""),
                self.version().unwrap_or(""),
            )
        })
    }
}

/// Version strings that fail to parse (including the empty string used for
/// a missing version) compare as plain text
fn compare_versions(lhs: &str, rhs: &str) -> Ordering {
    match version_compare::compare(lhs, rhs) {
        Ok(Cmp::Lt) => Ordering::Less,
        Ok(Cmp::Gt) => Ordering::Greater,
        Ok(_) => Ordering::Equal,
        Err(_) => lhs.cmp(rhs),
    }
}
