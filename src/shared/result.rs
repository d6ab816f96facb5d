/// Result alias used across the crate.
/// Typed errors (`ScanError`) are converted into `anyhow::Error` at the boundary
/// and recovered with `downcast_ref` where the caller needs to branch on them.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
