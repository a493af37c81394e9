use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow build scripts to distinguish argument mistakes
/// from failures that happened while collecting licenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - licenses were collected and written
    Success = 0,
    /// Application error (invalid path, tool failure, missing license, I/O error, etc.)
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing and validation errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific errors for license generation.
///
/// Fatal conditions only. Non-fatal ones (missing checkout for a product,
/// missing implicit license, unused config entries) go through the
/// `ProgressReporter` instead.
#[derive(Debug, Error)]
pub enum LicenseGenError {
    #[error("Invalid path: {path}\nReason: {reason}\n\n💡 Hint: Please specify an existing directory")]
    InvalidPath { path: PathBuf, reason: String },

    #[error("Unknown swift package manager version\nOutput: {output}\n\n💡 Hint: Please verify that `swift package --version` works in this environment")]
    UnknownToolVersion { output: String },

    #[error("Failed to run `{command}` in {path}\nDetails: {details}")]
    ToolInvocation {
        command: String,
        path: PathBuf,
        details: String,
    },

    #[error("Failed to decode package manifest: {path}\nDetails: {details}\n\n💡 Hint: Please verify that `swift package dump-package` succeeds for this package")]
    ManifestDecode { path: PathBuf, details: String },

    #[error("Missing libraries: {}\n\n💡 Hint: Please verify that the checkouts path contains every resolved package", names.join(", "))]
    MissingLibrary { names: Vec<String> },

    #[error("License file for {library} not found: {path}\n\n💡 Hint: Please fix license_path in your config file")]
    MissingLicense { library: String, path: PathBuf },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid config file: {path}\nDetails: {details}")]
    InvalidConfig { path: PathBuf, details: String },
}
