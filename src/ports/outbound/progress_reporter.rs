/// ProgressReporter port for reporting progress and diagnostics
///
/// This port is the logging side channel of the core: it is passed
/// explicitly to every traversal and resolution step. Non-fatal conditions
/// (unreachable checkouts, missing implicit licenses, unused config entries)
/// are reported through `report_error` and do not interrupt the run.
///
/// Implementations must be `Send + Sync` because concurrent traversal
/// branches report through the same instance.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    ///
    /// # Arguments
    /// * `message` - The progress message to report
    fn report(&self, message: &str);

    /// Reports progress with a percentage
    ///
    /// # Arguments
    /// * `current` - Current progress value
    /// * `total` - Total expected value
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    ///
    /// # Arguments
    /// * `message` - The error/warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    ///
    /// # Arguments
    /// * `message` - Completion message
    fn report_completion(&self, message: &str);
}
