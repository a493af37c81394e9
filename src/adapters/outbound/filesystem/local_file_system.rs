use crate::ports::outbound::FileSystem;
use crate::shared::error::LicenseGenError;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum license file size (10 MB)
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// LocalFileSystem adapter backed by `std::fs`
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn directory_contents(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(path).map_err(|e| LicenseGenError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        let mut contents = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| LicenseGenError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;
            contents.push(entry.path());
        }
        contents.sort();
        Ok(contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let metadata = fs::metadata(path).map_err(|e| LicenseGenError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        if !metadata.is_file() {
            return Err(LicenseGenError::FileReadError {
                path: path.to_path_buf(),
                details: "Not a regular file".to_string(),
            }
            .into());
        }

        if metadata.len() > MAX_FILE_SIZE {
            return Err(LicenseGenError::FileReadError {
                path: path.to_path_buf(),
                details: format!(
                    "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                    metadata.len(),
                    MAX_FILE_SIZE
                ),
            }
            .into());
        }

        fs::read_to_string(path).map_err(|e| {
            LicenseGenError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}
