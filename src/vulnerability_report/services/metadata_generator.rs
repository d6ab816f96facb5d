use crate::vulnerability_report::domain::ScanMetadata;
use chrono::Utc;
use uuid::Uuid;

/// MetadataGenerator service stamping each scan run
pub struct MetadataGenerator;

impl MetadataGenerator {
    /// Generates metadata with the current timestamp and a fresh scan id
    pub fn generate_metadata(tool_name: &str, tool_version: &str) -> ScanMetadata {
        let timestamp = Utc::now().to_rfc3339();
        let scan_id = format!("urn:uuid:{}", Uuid::new_v4());

        ScanMetadata::new(
            timestamp,
            tool_name.to_string(),
            tool_version.to_string(),
            scan_id,
        )
    }

    /// Metadata for this binary, using the compile-time version from Cargo.toml
    pub fn generate_default_metadata() -> ScanMetadata {
        Self::generate_metadata("repo-cve-scan", env!("CARGO_PKG_VERSION"))
    }
}
