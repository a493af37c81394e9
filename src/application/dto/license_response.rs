use crate::license_generation::domain::License;

/// LicenseResponse - Internal response DTO from the license generation use case
#[derive(Debug, Clone)]
pub struct LicenseResponse {
    /// Resolved licenses, sorted
    pub licenses: Vec<License>,
    /// Configuration entries that matched no collected library, sorted
    pub unused_modifiers: Vec<String>,
}

impl LicenseResponse {
    pub fn new(licenses: Vec<License>, unused_modifiers: Vec<String>) -> Self {
        Self {
            licenses,
            unused_modifiers,
        }
    }
}
