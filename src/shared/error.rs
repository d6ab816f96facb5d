use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - scan finished (vulnerable dependencies may still be reported)
    Success = 0,
    /// Vulnerable dependencies were found and `--fail-on-vulnerable` was set
    VulnerabilitiesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (graph store error, file I/O error, invalid input, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::VulnerabilitiesDetected => write!(f, "Vulnerabilities Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for repository scanning.
///
/// Graph store failures always carry the repository URL so the caller can
/// tell which registration to retry.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Error creating repository node for {repo_url}: could not reach the graph store\nDetails: {details}\n\n💡 Hint: Check that the Gremlin server is running and --gremlin-url is correct")]
    StoreCommunication { repo_url: String, details: String },

    #[error("Error creating repository node for {repo_url}: the graph store rejected the query\nDetails: {details}")]
    StoreQuery { repo_url: String, details: String },

    #[error("Graph data anomaly: {vertex} vertex has no '{property}' property")]
    LookupAnomaly { vertex: String, property: String },

    #[error("Invalid package coordinate '{coordinate}': {reason}\n\n💡 Hint: Coordinates must look like ecosystem:group:artifact:version")]
    InvalidCoordinate { coordinate: String, reason: String },

    #[error("Invalid repository URL '{repo_url}': {reason}")]
    InvalidRepositoryUrl { repo_url: String, reason: String },

    #[error("Scan input file not found: {path}\n\n💡 Hint: {suggestion}")]
    InputNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid scan input: {path}\nDetails: {details}\n\n💡 Hint: Each request needs a \"git-url\" string and a \"dependencies\" object with \"direct\" and \"transitive\" coordinate lists")]
    InvalidInput { path: PathBuf, details: String },

    /// Validation error for builder patterns and scan input
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl ScanError {
    /// Whether repeating the whole synchronize call may succeed.
    ///
    /// Only graph store failures qualify; the synchronization protocol
    /// drops and recreates every edge, so a full retry is safe.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ScanError::StoreCommunication { .. } | ScanError::StoreQuery { .. }
        )
    }
}

/// Failures reported by a `GraphStore` adapter, before they are tied to a
/// repository URL.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphStoreError {
    /// The store could not be reached (connection refused, timeout, TLS...)
    #[error("transport failure: {0}")]
    Transport(String),

    /// The store answered with a non-success status
    #[error("status {code}: {message}")]
    Status { code: u16, message: String },

    /// The store answered successfully but the payload could not be decoded
    #[error("malformed response: {0}")]
    Decode(String),
}
