use crate::license_generation::domain::{
    Library, License, LicenseContent, LicenseModifier, LicenseModifiers,
};
use crate::ports::outbound::{FileSystem, ProgressReporter};
use crate::shared::error::LicenseGenError;
use crate::shared::Result;
use std::path::PathBuf;

/// License file names searched in a checkout, in priority order
pub const LICENSE_CANDIDATES: [&str; 3] = ["LICENSE", "LICENSE.md", "LICENSE.txt"];

/// LicenseResolver pairs a collected library with its license text
///
/// Configuration modifiers take precedence over the checkout search and are
/// consumed as they are used, so the caller can report leftovers.
pub struct LicenseResolver<'a, FS: ?Sized, PR: ?Sized> {
    file_system: &'a FS,
    reporter: &'a PR,
}

impl<'a, FS, PR> LicenseResolver<'a, FS, PR>
where
    FS: FileSystem + ?Sized,
    PR: ProgressReporter + ?Sized,
{
    pub fn new(file_system: &'a FS, reporter: &'a PR) -> Self {
        Self {
            file_system,
            reporter,
        }
    }

    /// Resolves the license of `library`
    ///
    /// # Returns
    /// - `None` if the library is ignored by configuration
    /// - `None` (with a warning) if no candidate file exists in its checkout
    /// - The license otherwise
    ///
    /// # Errors
    /// - `MissingLicense` if a configured license path does not exist
    /// - Read failures of an existing license file
    pub fn resolve(
        &self,
        library: &Library,
        modifiers: &mut LicenseModifiers,
    ) -> Result<Option<License>> {
        let explicit = match modifiers.take(library.name()) {
            Some(LicenseModifier::Ignore) => return Ok(None),
            Some(LicenseModifier::LicensePath(path)) => Some(path),
            None => None,
        };

        let candidates: Vec<PathBuf> = match &explicit {
            Some(path) => vec![path.clone()],
            None => LICENSE_CANDIDATES
                .iter()
                .map(|name| library.checkout().path().join(name))
                .collect(),
        };

        for candidate in &candidates {
            if !self.file_system.exists(candidate) {
                continue;
            }
            let body = self.file_system.read_to_string(candidate)?;
            return Ok(Some(License::new(
                library.clone(),
                library.name(),
                Some(LicenseContent::new(None, body)),
            )));
        }

        match explicit {
            Some(path) => Err(LicenseGenError::MissingLicense {
                library: library.name().to_string(),
                path,
            }
            .into()),
            None => {
                self.reporter.report_error(&format!(
                    "⚠️  Warning: no license file found for {} in {}",
                    library.name(),
                    library.checkout().path().display()
                ));
                Ok(None)
            }
        }
    }
}
