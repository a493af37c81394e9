/// Swift Package Manager adapters
mod swiftpm_manifest_source;

pub use swiftpm_manifest_source::{parse_tool_version, SwiftPmManifestSource};
