use crate::vulnerability_report::domain::RepositoryReport;

/// ScanResponse - result of scanning one repository
#[derive(Debug, Clone)]
pub struct ScanResponse {
    /// Repository URL as submitted (trimmed)
    pub repo_url: String,
    /// Reports built from the traversal, one per repository URL seen
    pub reports: Vec<RepositoryReport>,
    /// Edges the synchronization asked for
    pub requested_edges: usize,
    /// Edges present after synchronization (requests with a matching vertex)
    pub linked_edges: usize,
}

impl ScanResponse {
    pub fn new(
        repo_url: String,
        reports: Vec<RepositoryReport>,
        requested_edges: usize,
        linked_edges: usize,
    ) -> Self {
        Self {
            repo_url,
            reports,
            requested_edges,
            linked_edges,
        }
    }

    /// Requested edges whose package version is not in the graph yet
    pub fn unresolved_edges(&self) -> usize {
        self.requested_edges.saturating_sub(self.linked_edges)
    }

    pub fn has_vulnerabilities(&self) -> bool {
        self.reports.iter().any(RepositoryReport::has_vulnerabilities)
    }
}
