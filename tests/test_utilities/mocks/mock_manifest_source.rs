use async_trait::async_trait;
use licensegen::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Mock ManifestSource answering from JSON fixtures keyed by package path
///
/// Counts invocations per path. With a jitter seed, every call sleeps for a
/// pseudo-random 0-15 ms so concurrent branches complete in varying order.
pub struct MockManifestSource {
    manifests: HashMap<PathBuf, String>,
    tool_version: String,
    jitter_seed: Option<u64>,
    calls: Mutex<HashMap<PathBuf, usize>>,
    total_calls: AtomicUsize,
}

impl MockManifestSource {
    pub fn new() -> Self {
        Self {
            manifests: HashMap::new(),
            tool_version: "5.6.0".to_string(),
            jitter_seed: None,
            calls: Mutex::new(HashMap::new()),
            total_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_manifest(mut self, path: impl Into<PathBuf>, json: &str) -> Self {
        self.manifests.insert(path.into(), json.to_string());
        self
    }

    pub fn with_tool_version(mut self, version: &str) -> Self {
        self.tool_version = version.to_string();
        self
    }

    pub fn with_jitter(mut self, seed: u64) -> Self {
        self.jitter_seed = Some(seed);
        self
    }

    pub fn calls_for(&self, path: impl AsRef<Path>) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(path.as_ref())
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }

    fn jitter(&self, path: &Path, call: usize) -> Option<Duration> {
        let seed = self.jitter_seed?;
        let mut hasher = DefaultHasher::new();
        (seed, path, call).hash(&mut hasher);
        Some(Duration::from_millis(hasher.finish() % 16))
    }
}

impl Default for MockManifestSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ManifestSource for MockManifestSource {
    async fn dump_package(&self, package_path: &Path) -> Result<Vec<u8>> {
        let call = self.total_calls.fetch_add(1, Ordering::SeqCst);
        *self
            .calls
            .lock()
            .unwrap()
            .entry(package_path.to_path_buf())
            .or_insert(0) += 1;

        if let Some(delay) = self.jitter(package_path, call) {
            tokio::time::sleep(delay).await;
        }

        self.manifests
            .get(package_path)
            .map(|json| json.clone().into_bytes())
            .ok_or_else(|| {
                LicenseGenError::ToolInvocation {
                    command: "swift package dump-package".to_string(),
                    path: package_path.to_path_buf(),
                    details: "no fixture".to_string(),
                }
                .into()
            })
    }

    async fn tool_version(&self) -> Result<String> {
        Ok(self.tool_version.clone())
    }
}
