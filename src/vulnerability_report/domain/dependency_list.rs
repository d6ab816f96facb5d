use super::{DependencyEdgeLabel, PackageCoordinate};
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Resolved dependency manifest of one repository
///
/// Produced by an external manifest-resolution step; each entry is a
/// coordinate string `ecosystem:group:artifact:version`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyList {
    #[serde(default)]
    pub direct: Vec<String>,
    #[serde(default)]
    pub transitive: Vec<String>,
}

impl DependencyList {
    pub fn new(direct: Vec<String>, transitive: Vec<String>) -> Self {
        Self { direct, transitive }
    }

    /// Every coordinate paired with the edge label it produces, direct first
    pub fn labeled_coordinates(&self) -> impl Iterator<Item = (DependencyEdgeLabel, &str)> {
        let direct = self
            .direct
            .iter()
            .map(|c| (DependencyEdgeLabel::Direct, c.as_str()));
        let transitive = self
            .transitive
            .iter()
            .map(|c| (DependencyEdgeLabel::Transitive, c.as_str()));
        direct.chain(transitive)
    }

    /// `ecosystem:name:version` keys of every submitted coordinate
    pub fn lookup_keys(&self) -> Result<HashSet<String>> {
        self.labeled_coordinates()
            .map(|(_, coordinate)| Ok(PackageCoordinate::parse(coordinate)?.lookup_key().joined()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.direct.len() + self.transitive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.transitive.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_missing_keys_default_to_empty() {
        let list: DependencyList = serde_json::from_str(r#"{"direct": ["npm::lodash:4.0.0"]}"#).unwrap();
        assert_eq!(list.direct, vec!["npm::lodash:4.0.0"]);
        assert!(list.transitive.is_empty());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_labeled_coordinates_direct_first() {
        let list = DependencyList::new(
            vec!["npm::a:1.0.0".to_string()],
            vec!["npm::b:2.0.0".to_string(), "npm::c:3.0.0".to_string()],
        );
        let labeled: Vec<_> = list.labeled_coordinates().collect();
        assert_eq!(
            labeled,
            vec![
                (DependencyEdgeLabel::Direct, "npm::a:1.0.0"),
                (DependencyEdgeLabel::Transitive, "npm::b:2.0.0"),
                (DependencyEdgeLabel::Transitive, "npm::c:3.0.0"),
            ]
        );
    }

    #[test]
    fn test_lookup_keys_use_graph_names() {
        let list = DependencyList::new(
            vec!["npm::lodash:4.0.0".to_string()],
            vec!["maven:io.netty:netty-all:4.1.0".to_string()],
        );
        let keys = list.lookup_keys().unwrap();
        assert!(keys.contains("npm:lodash:4.0.0"));
        assert!(keys.contains("maven:io.netty:netty-all:4.1.0"));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_lookup_keys_rejects_malformed_coordinate() {
        let list = DependencyList::new(vec!["lodash".to_string()], vec![]);
        assert!(list.lookup_keys().is_err());
    }

    #[test]
    fn test_empty_list() {
        let list = DependencyList::default();
        assert!(list.is_empty());
        assert_eq!(list.labeled_coordinates().count(), 0);
    }
}
