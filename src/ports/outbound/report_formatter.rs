use crate::shared::Result;
use crate::vulnerability_report::domain::{RepositoryReport, ScanMetadata};

/// ReportFormatter port for rendering vulnerability reports
pub trait ReportFormatter {
    /// Formats the reports of one scan run
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, reports: &[RepositoryReport], metadata: &ScanMetadata) -> Result<String>;
}
