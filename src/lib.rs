//! licensegen - license list generation for Swift Package Manager dependencies
//!
//! This library collects the third-party libraries a Swift package actually
//! builds against and pairs each with its license text, following hexagonal
//! architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`license_generation`): Domain models and the collection services
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use licensegen::prelude::*;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! // Create adapters
//! let reporter = Arc::new(StderrProgressReporter::new());
//! let use_case = GenerateLicensesUseCase::new(
//!     LocalFileSystem::new(),
//!     Arc::new(SwiftPmManifestSource::new()),
//!     Arc::clone(&reporter),
//! );
//!
//! // Execute
//! let request = LicenseRequest::new(
//!     vec![PathBuf::from("/DerivedData/App/SourcePackages/checkouts")],
//!     vec![PathBuf::from("/src/App")],
//! );
//! let response = use_case.execute(request, LicenseModifiers::default()).await?;
//!
//! // Write output
//! let writer = SettingsBundleWriter::new("com.example.licenses", None, reporter);
//! writer.write(&response.licenses)?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod license_generation;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{LocalFileSystem, SettingsBundleWriter};
    pub use crate::adapters::outbound::formatters::PlistFormatter;
    pub use crate::adapters::outbound::swiftpm::SwiftPmManifestSource;
    pub use crate::application::dto::{LicenseRequest, LicenseResponse};
    pub use crate::application::use_cases::GenerateLicensesUseCase;
    pub use crate::license_generation::domain::{
        Checkout, Library, License, LicenseContent, LicenseModifier, LicenseModifiers, Manifest,
        PackageDependency, Product, Target, TargetDependency,
    };
    pub use crate::license_generation::services::{
        CheckoutIndex, DependencyCollector, LicenseResolver, ManifestCache, ManifestDecoder,
    };
    pub use crate::ports::outbound::{FileSystem, LicenseWriter, ManifestSource, ProgressReporter};
    pub use crate::shared::error::LicenseGenError;
    pub use crate::shared::Result;
}
