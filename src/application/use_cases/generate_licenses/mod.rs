use crate::application::dto::{LicenseRequest, LicenseResponse};
use crate::license_generation::domain::{Checkout, Library, License, LicenseModifiers};
use crate::license_generation::services::{CheckoutIndex, DependencyCollector, LicenseResolver};
use crate::ports::outbound::{FileSystem, ManifestSource, ProgressReporter};
use crate::shared::error::LicenseGenError;
use crate::shared::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// GenerateLicensesUseCase - Core use case for license collection
///
/// Orchestrates checkout discovery, dependency collection and license
/// resolution, using generic dependency injection for all infrastructure.
///
/// # Type Parameters
/// * `FS` - FileSystem implementation
/// * `MS` - ManifestSource implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateLicensesUseCase<FS, MS: ?Sized, PR: ?Sized> {
    file_system: FS,
    manifest_source: Arc<MS>,
    progress_reporter: Arc<PR>,
}

impl<FS, MS, PR> GenerateLicensesUseCase<FS, MS, PR>
where
    FS: FileSystem,
    MS: ManifestSource + ?Sized + 'static,
    PR: ProgressReporter + ?Sized + 'static,
{
    /// Creates a new GenerateLicensesUseCase with injected dependencies
    pub fn new(file_system: FS, manifest_source: Arc<MS>, progress_reporter: Arc<PR>) -> Self {
        Self {
            file_system,
            manifest_source,
            progress_reporter,
        }
    }

    /// Executes the license generation use case
    ///
    /// # Arguments
    /// * `request` - Checkout roots, root packages and collection options
    /// * `modifiers` - Per-library configuration overrides
    ///
    /// # Returns
    /// LicenseResponse with sorted licenses and the configuration entries
    /// that were never used
    pub async fn execute(
        &self,
        request: LicenseRequest,
        mut modifiers: LicenseModifiers,
    ) -> Result<LicenseResponse> {
        // Step 1: Validate inputs
        self.validate_directories(&request.checkouts_paths)?;
        self.validate_directories(&request.package_paths)?;

        // Step 2: Discover checkouts
        let checkouts = CheckoutIndex::find_checkouts(&self.file_system, &request.checkouts_paths)?;
        self.progress_reporter
            .report(&format!("📦 Found {} checkout(s)", checkouts.len()));

        // Step 3: Collect libraries
        let libraries = self.collect_libraries(&request, &checkouts).await?;

        // Step 4: Resolve licenses
        let licenses = self.resolve_licenses(libraries, &mut modifiers)?;

        // Step 5: Report leftovers
        let unused_modifiers = modifiers.unused_names();
        for name in &unused_modifiers {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: config entry for {} was not used by any library",
                name
            ));
        }

        Ok(LicenseResponse::new(licenses, unused_modifiers))
    }

    fn validate_directories(&self, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            if !self.file_system.exists(path) {
                return Err(LicenseGenError::InvalidPath {
                    path: path.clone(),
                    reason: "Directory does not exist".to_string(),
                }
                .into());
            }
            if !self.file_system.is_directory(path) {
                return Err(LicenseGenError::InvalidPath {
                    path: path.clone(),
                    reason: "Path is not a directory".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Without root packages every checkout counts as one library and the
    /// tool is never invoked
    async fn collect_libraries(
        &self,
        request: &LicenseRequest,
        checkouts: &[Checkout],
    ) -> Result<Vec<Library>> {
        if request.package_paths.is_empty() {
            return Ok(checkouts.iter().cloned().map(Library::from_checkout).collect());
        }

        let tool_version = self.manifest_source.tool_version().await?;
        self.progress_reporter
            .report(&format!("🔧 Detected swift package manager {}", tool_version));

        let collector = DependencyCollector::new(
            Arc::clone(&self.manifest_source),
            Arc::clone(&self.progress_reporter),
        )
        .strict(request.strict);

        let mut libraries = HashSet::new();
        for package_path in &request.package_paths {
            libraries.extend(
                collector
                    .collect(package_path, checkouts, &tool_version)
                    .await?,
            );
        }

        let mut libraries: Vec<Library> = if request.per_products {
            libraries.into_iter().collect()
        } else {
            libraries
                .into_iter()
                .map(|library| library.checkout().clone())
                .collect::<HashSet<_>>()
                .into_iter()
                .map(Library::from_checkout)
                .collect()
        };
        libraries.sort();
        Ok(libraries)
    }

    fn resolve_licenses(
        &self,
        libraries: Vec<Library>,
        modifiers: &mut LicenseModifiers,
    ) -> Result<Vec<License>> {
        let resolver = LicenseResolver::new(&self.file_system, self.progress_reporter.as_ref());
        let total = libraries.len();
        let mut licenses = Vec::with_capacity(total);

        for (index, library) in libraries.iter().enumerate() {
            self.progress_reporter
                .report_progress(index + 1, total, Some(library.name()));
            if let Some(license) = resolver.resolve(library, modifiers)? {
                licenses.push(license);
            }
        }

        licenses.sort();
        self.progress_reporter
            .report(&format!("✅ Resolved {} license(s)", licenses.len()));
        Ok(licenses)
    }
}
