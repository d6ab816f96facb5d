use crate::ports::outbound::GraphStore;
use crate::shared::error::{GraphStoreError, ScanError};
use crate::shared::Result;
use crate::vulnerability_report::domain::{DependencyList, SyncPlan, TraversalResult};

/// GraphSynchronizer - records a repository's dependency list in the graph
///
/// Replaces the repository's dependency edges with the submitted list and
/// returns the traversal of the resulting edges. The call is idempotent:
/// repeating it with the same input leaves the same edge set, so a failed
/// call may be retried in full.
///
/// # Type Parameters
/// * `S` - GraphStore implementation
pub struct GraphSynchronizer<S: GraphStore> {
    graph_store: S,
}

impl<S: GraphStore> GraphSynchronizer<S> {
    pub fn new(graph_store: S) -> Self {
        Self { graph_store }
    }

    pub fn graph_store(&self) -> &S {
        &self.graph_store
    }

    /// Synchronizes `dependencies` for `repo_url`
    ///
    /// Coordinates without a matching package-version vertex are skipped;
    /// the returned rows only cover edges that exist after the update.
    ///
    /// # Errors
    /// - `InvalidRepositoryUrl` / `InvalidCoordinate` before the store is contacted
    /// - `StoreCommunication` when the store cannot be reached
    /// - `StoreQuery` when the store rejects the query or its answer is unreadable
    pub async fn synchronize(
        &self,
        repo_url: &str,
        dependencies: &DependencyList,
    ) -> Result<TraversalResult> {
        let plan = SyncPlan::build(repo_url, dependencies)?;
        self.synchronize_plan(&plan).await
    }

    /// Submits an already validated plan
    pub async fn synchronize_plan(&self, plan: &SyncPlan) -> Result<TraversalResult> {
        self.graph_store
            .synchronize(plan)
            .await
            .map_err(|e| Self::classify(plan.repo_url(), e).into())
    }

    fn classify(repo_url: &str, error: GraphStoreError) -> ScanError {
        match error {
            GraphStoreError::Transport(details) => ScanError::StoreCommunication {
                repo_url: repo_url.to_string(),
                details,
            },
            other => ScanError::StoreQuery {
                repo_url: repo_url.to_string(),
                details: other.to_string(),
            },
        }
    }
}
