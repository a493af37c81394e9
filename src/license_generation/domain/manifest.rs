use std::cmp::Ordering;

/// Manifest aggregate - the decoded, dialect-independent package description
///
/// Manifests are created once per package path by the collector and are
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub name: String,
    pub products: Vec<Product>,
    pub targets: Vec<Target>,
    pub dependencies: Vec<PackageDependency>,
}

impl Manifest {
    pub fn new(
        name: String,
        products: Vec<Product>,
        targets: Vec<Target>,
        dependencies: Vec<PackageDependency>,
    ) -> Self {
        Self {
            name,
            products,
            targets,
            dependencies,
        }
    }

    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    pub fn has_target(&self, name: &str) -> bool {
        self.target(name).is_some()
    }

    pub fn has_product(&self, name: &str) -> bool {
        self.product(name).is_some()
    }
}

/// A named, externally consumable unit exported by a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub targets: Vec<String>,
}

impl Product {
    pub fn new(name: impl Into<String>, targets: Vec<String>) -> Self {
        Self {
            name: name.into(),
            targets,
        }
    }
}

/// A named build unit within a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub dependencies: Vec<TargetDependency>,
}

impl Target {
    pub fn new(name: impl Into<String>, dependencies: Vec<TargetDependency>) -> Self {
        Self {
            name: name.into(),
            dependencies,
        }
    }
}

/// Target-level dependency reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetDependency {
    /// Unqualified reference: a sibling target or an external checkout
    ByName(String),
    /// Explicit sibling-target reference
    Target(String),
    /// Product exported by another package; `package` is its declared identity
    Product {
        name: String,
        package: Option<String>,
    },
}

impl TargetDependency {
    fn rank(&self) -> u8 {
        match self {
            TargetDependency::ByName(_) => 0,
            TargetDependency::Target(_) => 1,
            TargetDependency::Product { .. } => 2,
        }
    }
}

impl PartialOrd for TargetDependency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TargetDependency {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (TargetDependency::ByName(a), TargetDependency::ByName(b))
            | (TargetDependency::Target(a), TargetDependency::Target(b)) => a.cmp(b),
            (
                TargetDependency::Product {
                    name: a,
                    package: pa,
                },
                TargetDependency::Product {
                    name: b,
                    package: pb,
                },
            ) => pa
                .as_deref()
                .unwrap_or("")
                .cmp(pb.as_deref().unwrap_or(""))
                .then_with(|| a.cmp(b))
                .then_with(|| pa.cmp(pb)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// A package-level dependency declaration
///
/// `identity` is the declared identity, `display_name` falls back to the
/// identity when the manifest does not name the dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDependency {
    pub identity: String,
    pub display_name: String,
    pub url: String,
}

impl PackageDependency {
    pub fn new(identity: impl Into<String>, display_name: Option<String>, url: impl Into<String>) -> Self {
        let identity = identity.into();
        Self {
            display_name: display_name.unwrap_or_else(|| identity.clone()),
            identity,
            url: url.into(),
        }
    }

    /// Directory name a package manager uses for this dependency's checkout:
    /// the last URL path component without a trailing `.git`.
    pub fn checkout_name(&self) -> &str {
        let trimmed = self.url.trim_end_matches('/');
        let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
        last.strip_suffix(".git").unwrap_or(last)
    }

    /// Whether this declaration is the package referred to as `reference`
    /// (case-insensitive match on identity, display name or checkout name).
    pub fn matches(&self, reference: &str) -> bool {
        self.identity.eq_ignore_ascii_case(reference)
            || self.display_name.eq_ignore_ascii_case(reference)
            || self.checkout_name().eq_ignore_ascii_case(reference)
    }
}
