use clap::Parser;
use std::path::PathBuf;

/// Environment variable Xcode sets for build phases
pub const BUILD_DIR_ENV: &str = "BUILD_DIR";

/// Collect the licenses of Swift Package Manager dependencies
#[derive(Parser, Debug)]
#[command(name = "licensegen")]
#[command(version)]
#[command(
    about = "Generate license lists for Swift Package Manager dependencies",
    long_about = None
)]
pub struct Args {
    /// Config file, or a directory containing .licensegen.yml
    /// (defaults to ./.licensegen.yml when present)
    #[arg(long = "config-path", value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Checkouts directory of SwiftPM dependencies; can be specified multiple times
    /// (defaults to ${BUILD_DIR}/../../SourcePackages/checkouts)
    #[arg(long = "checkouts-path", value_name = "DIR")]
    pub checkouts_paths: Vec<PathBuf>,

    /// Directories containing Package.swift whose dependencies are collected
    #[arg(long, num_args = 1.., value_name = "DIR")]
    pub package_paths: Vec<PathBuf>,

    /// Output directory (if not specified, outputs to stdout)
    #[arg(long, value_name = "DIR")]
    pub output_path: Option<PathBuf>,

    /// Generate licenses per package products
    #[arg(long, requires = "package_paths")]
    pub per_products: bool,

    /// Fail when a referenced product cannot be located
    #[arg(long)]
    pub strict: bool,

    /// Write plists for an application's Settings.bundle
    #[arg(long, required = true, requires = "settings_bundle_prefix")]
    pub settings_bundle: bool,

    /// File name prefix of the Settings.bundle plists
    #[arg(long, value_name = "PREFIX")]
    pub settings_bundle_prefix: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Explicit checkouts paths, or the Xcode default derived from `build_dir`
    ///
    /// # Errors
    /// Returns a message when no path was given and `build_dir` is unset
    pub fn resolve_checkouts_paths(&self, build_dir: Option<PathBuf>) -> Result<Vec<PathBuf>, String> {
        if !self.checkouts_paths.is_empty() {
            return Ok(self.checkouts_paths.clone());
        }
        match build_dir {
            Some(dir) => Ok(vec![dir
                .join("..")
                .join("..")
                .join("SourcePackages")
                .join("checkouts")]),
            None => Err(format!(
                "missing {}: specify --checkouts-path or run from an Xcode build phase",
                BUILD_DIR_ENV
            )),
        }
    }
}
