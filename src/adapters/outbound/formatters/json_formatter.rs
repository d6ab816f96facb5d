use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use crate::vulnerability_report::domain::{RepositoryReport, ScanMetadata};
use anyhow::Context;

/// JsonReportFormatter adapter emitting the report list as JSON
///
/// The document is the bare `[{repo_url, vulnerable_deps}]` array consumed by
/// downstream services; run metadata is not part of it.
pub struct JsonReportFormatter;

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonReportFormatter {
    fn format(&self, reports: &[RepositoryReport], _metadata: &ScanMetadata) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(reports).context("Failed to serialize report to JSON")?;
        json.push('\n');
        Ok(json)
    }
}
