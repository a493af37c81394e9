use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// ManifestSource port for the external package-manifest introspection tool
///
/// This is a thin I/O boundary: no caching and no interpretation happen
/// here. Decoding belongs to `ManifestDecoder`, memoization to the collector.
///
/// # Async Support
/// Invoking the tool is the only suspending operation of a traversal.
/// Implementations must be `Send + Sync` so traversal branches can share one.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Dumps the manifest of the package at `package_path`
    ///
    /// # Returns
    /// The raw bytes the tool wrote to standard output
    ///
    /// # Errors
    /// Returns an error if the tool cannot be spawned or exits unsuccessfully
    async fn dump_package(&self, package_path: &Path) -> Result<Vec<u8>>;

    /// Detects the tool version used to choose a manifest dialect
    ///
    /// # Errors
    /// Returns `UnknownToolVersion` if the tool output contains no version
    async fn tool_version(&self) -> Result<String>;
}
