/// Mock implementations for testing
mod in_memory_file_system;
mod mock_manifest_source;
mod mock_progress_reporter;

pub use in_memory_file_system::InMemoryFileSystem;
pub use mock_manifest_source::MockManifestSource;
pub use mock_progress_reporter::MockProgressReporter;
