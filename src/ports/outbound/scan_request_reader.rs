use crate::application::dto::ScanRequest;
use crate::shared::Result;
use std::path::Path;

/// ScanRequestReader port for loading scan requests
///
/// This port abstracts where repository registrations (repository URL plus
/// resolved dependency list) come from.
pub trait ScanRequestReader {
    /// Reads every scan request stored at `path`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The input does not exist or cannot be read
    /// - The content is not a scan request or a list of scan requests
    fn read_scan_requests(&self, path: &Path) -> Result<Vec<ScanRequest>>;
}
