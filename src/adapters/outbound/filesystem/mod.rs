/// Filesystem adapters for file I/O operations
mod local_file_system;
mod settings_bundle_writer;

pub use local_file_system::LocalFileSystem;
pub use settings_bundle_writer::SettingsBundleWriter;
