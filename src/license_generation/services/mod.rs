mod checkout_index;
mod dependency_collector;
mod license_resolver;
mod manifest_cache;
mod manifest_decoder;

pub use checkout_index::CheckoutIndex;
pub use dependency_collector::DependencyCollector;
pub use license_resolver::{LicenseResolver, LICENSE_CANDIDATES};
pub use manifest_cache::ManifestCache;
pub use manifest_decoder::ManifestDecoder;
