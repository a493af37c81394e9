/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, swift toolchain, console, etc.).
pub mod file_system;
pub mod license_writer;
pub mod manifest_source;
pub mod progress_reporter;

pub use file_system::FileSystem;
pub use license_writer::LicenseWriter;
pub use manifest_source::ManifestSource;
pub use progress_reporter::ProgressReporter;
