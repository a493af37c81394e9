use super::manifest_decoder::ManifestDecoder;
use crate::license_generation::domain::Manifest;
use crate::ports::outbound::ManifestSource;
use crate::shared::error::LicenseGenError;
use crate::shared::Result;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// ManifestCache memoizes decoded manifests by package path.
///
/// Each path owns a `OnceCell`, so concurrent requests for the same path
/// share a single in-flight fetch: the tool runs at most once per path for
/// the lifetime of the cache. Different paths fetch in parallel.
///
/// A failed fetch leaves the cell empty; the error goes to the caller that
/// ran it.
pub struct ManifestCache<MS: ?Sized> {
    source: Arc<MS>,
    decoder: ManifestDecoder,
    entries: DashMap<PathBuf, Arc<OnceCell<Arc<Manifest>>>>,
}

impl<MS: ManifestSource + ?Sized> ManifestCache<MS> {
    pub fn new(source: Arc<MS>, decoder: ManifestDecoder) -> Self {
        Self {
            source,
            decoder,
            entries: DashMap::new(),
        }
    }

    /// Returns the manifest of the package at `package_path`, fetching and
    /// decoding it on first use
    ///
    /// # Errors
    /// - Whatever the manifest source reports for the tool invocation
    /// - `ManifestDecode` if the output does not match the selected dialect
    pub async fn manifest(&self, package_path: &Path) -> Result<Arc<Manifest>> {
        // The map guard must not live across an await point.
        let cell = self
            .entries
            .entry(package_path.to_path_buf())
            .or_default()
            .clone();

        let manifest = cell
            .get_or_try_init(|| async {
                let data = self.source.dump_package(package_path).await?;
                let manifest = self.decoder.decode(&data).map_err(|e| {
                    LicenseGenError::ManifestDecode {
                        path: package_path.to_path_buf(),
                        details: format!("{:#}\nOutput: {}", e, output_excerpt(&data)),
                    }
                })?;
                Ok::<_, anyhow::Error>(Arc::new(manifest))
            })
            .await?;

        Ok(Arc::clone(manifest))
    }

    /// Number of package paths that have been requested
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const OUTPUT_EXCERPT_CHARS: usize = 200;

/// Leading part of the raw tool output, for decode error messages
fn output_excerpt(data: &[u8]) -> String {
    let text = String::from_utf8_lossy(data);
    let text = text.trim();
    match text.char_indices().nth(OUTPUT_EXCERPT_CHARS) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
