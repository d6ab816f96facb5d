use crate::application::dto::ScanRequest;
use crate::ports::outbound::ScanRequestReader;
use crate::shared::error::ScanError;
use crate::shared::security::{read_regular_file, MAX_INPUT_FILE_SIZE};
use crate::shared::Result;
use serde_json::Value;
use std::path::Path;

/// FileSystemReader adapter for reading scan requests from JSON files
///
/// This adapter implements the ScanRequestReader port. The file holds either
/// one `{"git-url": ..., "dependencies": {...}}` object or an array of them.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanRequestReader for FileSystemReader {
    fn read_scan_requests(&self, path: &Path) -> Result<Vec<ScanRequest>> {
        if !path.exists() {
            return Err(ScanError::InputNotFound {
                path: path.to_path_buf(),
                suggestion: format!(
                    "Input file \"{}\" does not exist.\n   \
                     Please specify a JSON file with the --input option.",
                    path.display()
                ),
            }
            .into());
        }

        let content = read_regular_file(path, "scan input", MAX_INPUT_FILE_SIZE).map_err(|e| {
            ScanError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
        })?;

        Self::parse_requests(&content).map_err(|e| {
            ScanError::InvalidInput {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl FileSystemReader {
    /// Parses one request or an array of them
    ///
    /// The document shape is decided first so that a schema error reports
    /// the offending field with its line and column.
    fn parse_requests(content: &str) -> serde_json::Result<Vec<ScanRequest>> {
        let document: Value = serde_json::from_str(content)?;
        if document.is_array() {
            serde_json::from_str(content)
        } else {
            serde_json::from_str::<ScanRequest>(content).map(|request| vec![request])
        }
    }
}
