//! Typed view of the rows returned by the repository traversal.
//!
//! Gremlin `valueMap(true)` returns every vertex property as a list, even
//! when the schema guarantees a single value. `VertexProperties` keeps the
//! multi-valued shape but exposes explicit single-value accessors.

use super::DependencyEdgeLabel;
use crate::shared::error::ScanError;
use crate::shared::Result;
use std::collections::HashMap;

/// Property names used by the vertices this crate reads and writes
pub mod property {
    /// Label property stamped on repository vertices
    pub const VERTEX_LABEL: &str = "vertex_label";
    /// Value of `vertex_label` for repository vertices
    pub const REPO_VERTEX_LABEL: &str = "Repo";
    pub const REPO_URL: &str = "repo_url";
    pub const ECOSYSTEM: &str = "pecosystem";
    pub const NAME: &str = "pname";
    pub const VERSION: &str = "version";
    pub const CVE_IDS: &str = "cve_ids";
}

/// Multi-valued property map of a vertex
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexProperties {
    properties: HashMap<String, Vec<String>>,
}

impl VertexProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(properties: HashMap<String, Vec<String>>) -> Self {
        Self { properties }
    }

    /// Builder helper: sets `key` to a single value
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.properties
            .insert(key.to_string(), vec![value.to_string()]);
        self
    }

    /// Builder helper: sets `key` to a list of values
    pub fn with_values<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties
            .insert(key.to_string(), values.into_iter().map(Into::into).collect());
        self
    }

    /// First value of `key`, if any
    pub fn single(&self, key: &str) -> Option<&str> {
        self.properties
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// First value of `key`, or a `LookupAnomaly` naming the vertex role
    pub fn require(&self, key: &str, vertex: &str) -> Result<&str> {
        self.single(key).ok_or_else(|| {
            ScanError::LookupAnomaly {
                vertex: vertex.to_string(),
                property: key.to_string(),
            }
            .into()
        })
    }

    /// All values of `key`; empty when the property is absent
    pub fn values(&self, key: &str) -> &[String] {
        self.properties
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Edge between a repository and a package-version vertex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub id: Option<String>,
    pub label: String,
}

impl EdgeRecord {
    pub fn new(id: Option<String>, label: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
        }
    }

    pub fn from_label(label: DependencyEdgeLabel) -> Self {
        Self::new(None, label.as_str())
    }

    pub fn is_transitive(&self) -> bool {
        DependencyEdgeLabel::from_label(&self.label) == Some(DependencyEdgeLabel::Transitive)
    }
}

/// One `(repository, edge, package-version)` triple of the traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalRow {
    pub repository: VertexProperties,
    pub edge: EdgeRecord,
    pub package: VertexProperties,
}

impl TraversalRow {
    pub fn new(repository: VertexProperties, edge: EdgeRecord, package: VertexProperties) -> Self {
        Self {
            repository,
            edge,
            package,
        }
    }

    pub fn repo_url(&self) -> Result<&str> {
        self.repository.require(property::REPO_URL, "repository")
    }

    pub fn ecosystem(&self) -> Result<&str> {
        self.package.require(property::ECOSYSTEM, "package version")
    }

    pub fn name(&self) -> Result<&str> {
        self.package.require(property::NAME, "package version")
    }

    pub fn version(&self) -> Result<&str> {
        self.package.require(property::VERSION, "package version")
    }

    pub fn cve_annotations(&self) -> &[String] {
        self.package.values(property::CVE_IDS)
    }
}

/// Ordered traversal output for one synchronize call
pub type TraversalResult = Vec<TraversalRow>;

#[cfg(test)]
mod tests {
    use super::*;

    fn lodash() -> VertexProperties {
        VertexProperties::new()
            .with(property::ECOSYSTEM, "npm")
            .with(property::NAME, "lodash")
            .with(property::VERSION, "4.0.0")
            .with_values(property::CVE_IDS, ["CVE-2020-8203:7.4", "CVE-2019-10744:9.1"])
    }

    #[test]
    fn test_single_returns_first_value() {
        let props = VertexProperties::new().with_values(property::REPO_URL, ["a", "b"]);
        assert_eq!(props.single(property::REPO_URL), Some("a"));
    }

    #[test]
    fn test_values_absent_property_is_empty() {
        let props = VertexProperties::new();
        assert!(props.values(property::CVE_IDS).is_empty());
        assert_eq!(props.single(property::CVE_IDS), None);
    }

    #[test]
    fn test_require_missing_property_is_lookup_anomaly() {
        let row = TraversalRow::new(
            VertexProperties::new(),
            EdgeRecord::from_label(DependencyEdgeLabel::Direct),
            lodash(),
        );
        let err = row.repo_url().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScanError>(),
            Some(ScanError::LookupAnomaly { property, .. }) if property == "repo_url"
        ));
    }

    #[test]
    fn test_row_accessors() {
        let row = TraversalRow::new(
            VertexProperties::new().with(property::REPO_URL, "github.com/x/y"),
            EdgeRecord::from_label(DependencyEdgeLabel::Transitive),
            lodash(),
        );
        assert_eq!(row.repo_url().unwrap(), "github.com/x/y");
        assert_eq!(row.ecosystem().unwrap(), "npm");
        assert_eq!(row.name().unwrap(), "lodash");
        assert_eq!(row.version().unwrap(), "4.0.0");
        assert_eq!(row.cve_annotations().len(), 2);
        assert!(row.edge.is_transitive());
    }

    #[test]
    fn test_edge_is_transitive_only_for_transitive_label() {
        assert!(!EdgeRecord::from_label(DependencyEdgeLabel::Direct).is_transitive());
        assert!(!EdgeRecord::new(Some("e1".to_string()), "other").is_transitive());
    }

    #[test]
    fn test_edge_labels_read_from_store() {
        assert!(EdgeRecord::new(Some("e1".to_string()), "has_transitive_dependency").is_transitive());
        assert!(!EdgeRecord::new(Some("e2".to_string()), "has_dependency").is_transitive());
        assert!(!EdgeRecord::new(Some("e3".to_string()), "depends_on").is_transitive());
        assert!(!EdgeRecord::new(None, "").is_transitive());
    }
}
