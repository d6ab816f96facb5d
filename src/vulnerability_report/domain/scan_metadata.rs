/// ScanMetadata value object describing one scan run
#[derive(Debug, Clone)]
pub struct ScanMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    scan_id: String,
}

impl ScanMetadata {
    pub fn new(timestamp: String, tool_name: String, tool_version: String, scan_id: String) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
            scan_id,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn scan_id(&self) -> &str {
        &self.scan_id
    }
}
