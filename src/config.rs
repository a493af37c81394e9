//! Configuration file support for licensegen.
//!
//! Provides YAML-based per-library overrides through `.licensegen.yml`
//! files, including the file schema, loading and validation.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::license_generation::domain::{LicenseModifier, LicenseModifiers};
use crate::shared::error::LicenseGenError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = ".licensegen.yml";

/// One library entry of the configuration file.
///
/// ```yaml
/// LegacyLib:
///   ignore:
/// OtherLib:
///   license_path: licenses/OTHER.txt
/// ```
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Absent: not ignored. Present with no value: ignored.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub ignore: Option<Option<bool>>,
    pub license_path: Option<String>,
}

/// Distinguishes `ignore:` (present, null) from a missing key.
fn deserialize_present<'de, D>(deserializer: D) -> std::result::Result<Option<Option<bool>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(Some)
}

impl LibraryConfig {
    fn is_ignored(&self) -> bool {
        matches!(self.ignore, Some(None) | Some(Some(true)))
    }

    /// The modifier this entry stands for, if any
    fn modifier(&self, library: &str) -> std::result::Result<Option<LicenseModifier>, String> {
        match (self.is_ignored(), &self.license_path) {
            (true, Some(_)) => Err(format!(
                "{}: You can only specify ignore: or license_path:",
                library
            )),
            (true, None) => Ok(Some(LicenseModifier::Ignore)),
            (false, Some(path)) => Ok(Some(LicenseModifier::LicensePath(PathBuf::from(path)))),
            (false, None) => Ok(None),
        }
    }
}

/// Load modifiers from an explicit path.
///
/// `path` may be the file itself or a directory containing `.licensegen.yml`.
/// Returns an error if nothing is found there.
pub fn load_config_from_path(path: &Path) -> Result<LicenseModifiers> {
    if !path.exists() {
        return Err(LicenseGenError::InvalidConfig {
            path: path.to_path_buf(),
            details: "invalid --config-path".to_string(),
        }
        .into());
    }
    let file_path = if path.is_dir() {
        path.join(CONFIG_FILENAME)
    } else {
        path.to_path_buf()
    };

    let content = std::fs::read_to_string(&file_path).map_err(|e| LicenseGenError::InvalidConfig {
        path: file_path.clone(),
        details: format!("missing {}: {}", file_path.display(), e),
    })?;

    parse_config(&content).map_err(|details| {
        LicenseGenError::InvalidConfig {
            path: file_path,
            details,
        }
        .into()
    })
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<LicenseModifiers>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let modifiers = load_config_from_path(&config_path)?;
    Ok(Some(modifiers))
}

/// Parse the YAML mapping into modifiers; entries with neither key are dropped.
fn parse_config(content: &str) -> std::result::Result<LicenseModifiers, String> {
    if content.trim().is_empty() {
        return Ok(LicenseModifiers::default());
    }
    let entries: Option<BTreeMap<String, Option<LibraryConfig>>> =
        serde_yaml_ng::from_str(content).map_err(|e| format!("cannot parse {}. {}", CONFIG_FILENAME, e))?;

    let mut modifiers = Vec::new();
    for (library, config) in entries.unwrap_or_default() {
        let config = config.unwrap_or_default();
        if let Some(modifier) = config.modifier(&library)? {
            modifiers.push((library, modifier));
        }
    }
    Ok(modifiers.into_iter().collect())
}
