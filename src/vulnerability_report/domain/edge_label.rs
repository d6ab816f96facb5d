use std::fmt;

/// Label of a repository -> package-version edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DependencyEdgeLabel {
    /// Declared in the repository manifest (`has_dependency`)
    Direct,
    /// Pulled in through another dependency (`has_transitive_dependency`)
    Transitive,
}

impl DependencyEdgeLabel {
    pub const ALL: [DependencyEdgeLabel; 2] =
        [DependencyEdgeLabel::Direct, DependencyEdgeLabel::Transitive];

    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyEdgeLabel::Direct => "has_dependency",
            DependencyEdgeLabel::Transitive => "has_transitive_dependency",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "has_dependency" => Some(DependencyEdgeLabel::Direct),
            "has_transitive_dependency" => Some(DependencyEdgeLabel::Transitive),
            _ => None,
        }
    }
}

impl fmt::Display for DependencyEdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
