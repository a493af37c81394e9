use clap::error::ErrorKind;
use clap::CommandFactory;
use licensegen::adapters::outbound::console::StderrProgressReporter;
use licensegen::adapters::outbound::filesystem::{LocalFileSystem, SettingsBundleWriter};
use licensegen::adapters::outbound::swiftpm::SwiftPmManifestSource;
use licensegen::application::dto::LicenseRequest;
use licensegen::application::use_cases::GenerateLicensesUseCase;
use licensegen::cli::{Args, BUILD_DIR_ENV};
use licensegen::config::{discover_config, load_config_from_path};
use licensegen::ports::outbound::LicenseWriter;
use licensegen::shared::error::{ExitCode, LicenseGenError};
use licensegen::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

async fn run() -> Result<()> {
    // Parse command-line arguments (clap exits with 2 on usage errors)
    let args = Args::parse_args();

    let checkouts_paths = args
        .resolve_checkouts_paths(std::env::var_os(BUILD_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|message| {
            Args::command()
                .error(ErrorKind::MissingRequiredArgument, message)
                .exit()
        });

    // Load per-library overrides
    let modifiers = match &args.config_path {
        Some(path) => load_config_from_path(path)?,
        None => discover_config(Path::new("."))?.unwrap_or_default(),
    };

    // Create adapters (Dependency Injection)
    let progress_reporter = Arc::new(StderrProgressReporter::new());
    let use_case = GenerateLicensesUseCase::new(
        LocalFileSystem::new(),
        Arc::new(SwiftPmManifestSource::new()),
        Arc::clone(&progress_reporter),
    );

    // Create request
    let request = LicenseRequest::new(absolute_all(&checkouts_paths)?, absolute_all(&args.package_paths)?)
        .per_products(args.per_products)
        .strict(args.strict);

    // Execute use case
    let response = use_case.execute(request, modifiers).await?;

    // Write output
    let prefix = args.settings_bundle_prefix.unwrap_or_default();
    let output_path = args.output_path.as_deref().map(absolute).transpose()?;
    let writer = SettingsBundleWriter::new(prefix, output_path, progress_reporter);
    writer.write(&response.licenses)?;

    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| {
        LicenseGenError::InvalidPath {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn absolute_all(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    paths.iter().map(|p| absolute(p)).collect()
}
