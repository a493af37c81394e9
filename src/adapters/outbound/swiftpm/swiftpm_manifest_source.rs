use crate::ports::outbound::ManifestSource;
use crate::shared::error::LicenseGenError;
use crate::shared::Result;
use async_trait::async_trait;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::process::Command;

const ENV: &str = "/usr/bin/env";
const DUMP_PACKAGE_ARGS: [&str; 3] = ["swift", "package", "dump-package"];
const VERSION_ARGS: [&str; 3] = ["swift", "package", "--version"];

/// SwiftPmManifestSource adapter running `swift package` as a subprocess
///
/// No timeout is applied: a hanging tool hangs the calling branch.
pub struct SwiftPmManifestSource;

impl SwiftPmManifestSource {
    pub fn new() -> Self {
        Self
    }

    async fn run(args: &[&str], working_directory: Option<&Path>) -> Result<Vec<u8>> {
        let mut command = Command::new(ENV);
        command.args(args);
        if let Some(dir) = working_directory {
            command.current_dir(dir);
        }
        let directory = working_directory
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let output = command
            .output()
            .await
            .map_err(|e| LicenseGenError::ToolInvocation {
                command: args.join(" "),
                path: directory.clone(),
                details: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(LicenseGenError::ToolInvocation {
                command: args.join(" "),
                path: directory,
                details: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            }
            .into());
        }

        Ok(output.stdout)
    }
}

impl Default for SwiftPmManifestSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ManifestSource for SwiftPmManifestSource {
    async fn dump_package(&self, package_path: &Path) -> Result<Vec<u8>> {
        Self::run(&DUMP_PACKAGE_ARGS, Some(package_path)).await
    }

    async fn tool_version(&self) -> Result<String> {
        let stdout = Self::run(&VERSION_ARGS, None).await?;
        parse_tool_version(&String::from_utf8_lossy(&stdout))
    }
}

static TOOL_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d.\d.\d?)").expect("tool version pattern is valid"));

/// Extracts the first `X.Y.Z` looking version from `swift package --version`
/// output
///
/// # Errors
/// Returns `UnknownToolVersion` carrying the raw output when nothing matches
pub fn parse_tool_version(output: &str) -> Result<String> {
    TOOL_VERSION_PATTERN
        .captures(output)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            LicenseGenError::UnknownToolVersion {
                output: output.trim().to_string(),
            }
            .into()
        })
}
