use crate::shared::error::GraphStoreError;
use crate::vulnerability_report::domain::{SyncPlan, TraversalResult};
use async_trait::async_trait;

/// GraphStore port for the shared dependency graph
///
/// Implementations execute a whole `SyncPlan` as one unit of work (see
/// `SyncPlan` for the protocol) and return the traversal rows of the
/// repository's dependency edges after the update.
///
/// Package-version vertices are owned by an external ingestion pipeline;
/// implementations must never create or modify them.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Synchronizes the repository's dependency edges and returns the
    /// `(repository, edge, package-version)` rows in traversal order
    ///
    /// # Errors
    /// - `GraphStoreError::Transport` when the store cannot be reached
    /// - `GraphStoreError::Status` when the store rejects the query
    /// - `GraphStoreError::Decode` when the response cannot be understood
    async fn synchronize(&self, plan: &SyncPlan) -> Result<TraversalResult, GraphStoreError>;
}

#[async_trait]
impl<T: GraphStore + ?Sized> GraphStore for std::sync::Arc<T> {
    async fn synchronize(&self, plan: &SyncPlan) -> Result<TraversalResult, GraphStoreError> {
        (**self).synchronize(plan).await
    }
}
