use crate::license_generation::domain::Checkout;
use crate::ports::outbound::FileSystem;
use crate::shared::Result;
use std::collections::HashSet;
use std::path::PathBuf;

/// CheckoutIndex service for discovering fetched dependencies on disk
///
/// Every immediate subdirectory of a checkouts root is one checkout.
/// Validating that the roots exist is the caller's job.
pub struct CheckoutIndex;

impl CheckoutIndex {
    /// Lists the checkouts under `roots`
    ///
    /// # Arguments
    /// * `file_system` - Filesystem capability used for listing
    /// * `roots` - Checkouts directories, in priority order
    ///
    /// # Returns
    /// One checkout per distinct directory name (the first root wins),
    /// sorted by name
    pub fn find_checkouts<FS>(file_system: &FS, roots: &[PathBuf]) -> Result<Vec<Checkout>>
    where
        FS: FileSystem + ?Sized,
    {
        let mut seen = HashSet::new();
        let mut checkouts = Vec::new();

        for root in roots {
            for path in file_system.directory_contents(root)? {
                if !file_system.is_directory(&path) {
                    continue;
                }
                let checkout = Checkout::new(path);
                if seen.insert(checkout.name().to_string()) {
                    checkouts.push(checkout);
                }
            }
        }

        checkouts.sort();
        Ok(checkouts)
    }
}
