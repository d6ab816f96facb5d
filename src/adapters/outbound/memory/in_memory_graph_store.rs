use crate::ports::outbound::GraphStore;
use crate::shared::error::GraphStoreError;
use crate::vulnerability_report::domain::{
    property, DependencyEdgeLabel, EdgeRecord, PackageVersionKey, SyncPlan, TraversalResult,
    TraversalRow, VertexProperties,
};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone)]
struct StoredEdge {
    id: u64,
    label: DependencyEdgeLabel,
    target: PackageVersionKey,
}

#[derive(Debug, Default)]
struct RepositoryVertex {
    id: u64,
    edges: Vec<StoredEdge>,
}

/// InMemoryGraphStore adapter holding the graph in process memory
///
/// Executes the same synchronization protocol as the Gremlin store. The
/// repository's entry stays locked while its edges are replaced, so a
/// concurrent synchronization of the same URL sees either the old or the
/// new edge set, never a mix.
#[derive(Debug, Default)]
pub struct InMemoryGraphStore {
    packages: DashMap<PackageVersionKey, Vec<String>>,
    repositories: DashMap<String, RepositoryVertex>,
    next_id: AtomicU64,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a package-version vertex with its CVE annotations
    pub fn with_package(self, ecosystem: &str, name: &str, version: &str, cves: &[&str]) -> Self {
        self.add_package(ecosystem, name, version, cves);
        self
    }

    pub fn add_package(&self, ecosystem: &str, name: &str, version: &str, cves: &[&str]) {
        self.packages.insert(
            PackageVersionKey::new(ecosystem, name, version),
            cves.iter().map(|c| c.to_string()).collect(),
        );
    }

    /// Current outgoing dependency edges of a repository, as `(label, joined key)`
    pub fn edges_of(&self, repo_url: &str) -> Vec<(DependencyEdgeLabel, String)> {
        self.repositories
            .get(repo_url)
            .map(|repo| {
                repo.edges
                    .iter()
                    .map(|edge| (edge.label, edge.target.joined()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn repository_count(&self) -> usize {
        self.repositories.len()
    }

    fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn package_properties(&self, key: &PackageVersionKey) -> VertexProperties {
        let cves = self
            .packages
            .get(key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();

        VertexProperties::new()
            .with(property::ECOSYSTEM, &key.ecosystem)
            .with(property::NAME, &key.name)
            .with(property::VERSION, &key.version)
            .with_values(property::CVE_IDS, cves)
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn synchronize(
        &self,
        plan: &SyncPlan,
    ) -> std::result::Result<TraversalResult, GraphStoreError> {
        let mut repo = self
            .repositories
            .entry(plan.repo_url().to_string())
            .or_insert_with(|| RepositoryVertex {
                id: self.allocate_id(),
                edges: Vec::new(),
            });

        repo.edges = plan
            .edges()
            .iter()
            .filter(|request| self.packages.contains_key(&request.key))
            .map(|request| StoredEdge {
                id: self.allocate_id(),
                label: request.label,
                target: request.key.clone(),
            })
            .collect();

        let repository = VertexProperties::new()
            .with("id", &repo.id.to_string())
            .with(property::VERTEX_LABEL, property::REPO_VERTEX_LABEL)
            .with(property::REPO_URL, plan.repo_url());

        Ok(repo
            .edges
            .iter()
            .map(|edge| {
                TraversalRow::new(
                    repository.clone(),
                    EdgeRecord::new(Some(edge.id.to_string()), edge.label.as_str()),
                    self.package_properties(&edge.target),
                )
            })
            .collect())
    }
}
