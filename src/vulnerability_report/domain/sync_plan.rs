use super::{DependencyEdgeLabel, DependencyList, PackageCoordinate, PackageVersionKey};
use crate::shared::error::ScanError;
use crate::shared::Result;
use std::collections::HashSet;

/// One edge the synchronization should create, if the target vertex exists
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeRequest {
    pub label: DependencyEdgeLabel,
    pub key: PackageVersionKey,
}

/// Typed description of a repository synchronization
///
/// Every graph store executes the same protocol for a plan, as one unit:
///
/// 1. get-or-create the repository vertex by `repo_url`
/// 2. drop all of its `has_dependency` / `has_transitive_dependency` edges
/// 3. for each edge request, add the edge if a package-version vertex with
///    the request's key exists; skip it silently otherwise
/// 4. return one traversal row per remaining outgoing dependency edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    repo_url: String,
    edges: Vec<EdgeRequest>,
}

impl SyncPlan {
    /// Validates the repository URL and every coordinate of `dependencies`
    ///
    /// Repeated `(label, coordinate)` pairs collapse into a single request;
    /// order of first appearance is kept.
    pub fn build(repo_url: &str, dependencies: &DependencyList) -> Result<Self> {
        let repo_url = repo_url.trim();
        if repo_url.is_empty() {
            return Err(ScanError::InvalidRepositoryUrl {
                repo_url: repo_url.to_string(),
                reason: "repository URL cannot be empty".to_string(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        let mut edges = Vec::with_capacity(dependencies.len());
        for (label, coordinate) in dependencies.labeled_coordinates() {
            let request = EdgeRequest {
                label,
                key: PackageCoordinate::parse(coordinate)?.lookup_key(),
            };
            if seen.insert(request.clone()) {
                edges.push(request);
            }
        }

        Ok(Self {
            repo_url: repo_url.to_string(),
            edges,
        })
    }

    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    pub fn edges(&self) -> &[EdgeRequest] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
