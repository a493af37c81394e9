use std::path::PathBuf;

/// LicenseRequest - Internal request DTO for the license generation use case
#[derive(Debug, Clone)]
pub struct LicenseRequest {
    /// Directories whose immediate subdirectories are checkouts, in priority order
    pub checkouts_paths: Vec<PathBuf>,
    /// Root packages to collect from; empty means every checkout is a library
    pub package_paths: Vec<PathBuf>,
    /// Keep one license per reached product instead of one per checkout
    pub per_products: bool,
    /// Fail on unreachable products instead of warning
    pub strict: bool,
}

impl LicenseRequest {
    pub fn new(checkouts_paths: Vec<PathBuf>, package_paths: Vec<PathBuf>) -> Self {
        Self {
            checkouts_paths,
            package_paths,
            per_products: false,
            strict: false,
        }
    }

    pub fn per_products(mut self, per_products: bool) -> Self {
        self.per_products = per_products;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
