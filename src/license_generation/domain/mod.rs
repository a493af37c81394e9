pub mod checkout;
pub mod library;
pub mod license;
pub mod license_modifier;
pub mod manifest;

pub use checkout::Checkout;
pub use library::Library;
pub use license::{License, LicenseContent};
pub use license_modifier::{LicenseModifier, LicenseModifiers};
pub use manifest::{Manifest, PackageDependency, Product, Target, TargetDependency};
