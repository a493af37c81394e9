use crate::license_generation::domain::License;
use crate::shared::Result;

/// LicenseWriter port for serializing the final license list
///
/// The list is already sorted; writers keep that order. Where the output
/// goes (a directory, stdout) and its layout are up to the adapter.
pub trait LicenseWriter {
    /// Writes the licenses to the output destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - The output path exists and is not a directory
    /// - Creating, moving or removing output files fails
    fn write(&self, licenses: &[License]) -> Result<()>;
}
