use crate::shared::error::ScanError;
use crate::shared::Result;
use std::fmt;

/// Number of `:`-separated fields in a coordinate string
const COORDINATE_FIELDS: usize = 4;

/// Package coordinate parsed from `ecosystem:group:artifact:version`
///
/// Group and artifact may be empty; ecosystem and version may not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageCoordinate {
    ecosystem: String,
    group: String,
    artifact: String,
    version: String,
}

impl PackageCoordinate {
    pub fn parse(coordinate: &str) -> Result<Self> {
        let fields: Vec<&str> = coordinate.split(':').collect();
        if fields.len() != COORDINATE_FIELDS {
            return Err(ScanError::InvalidCoordinate {
                coordinate: coordinate.to_string(),
                reason: format!(
                    "expected {} ':'-separated fields, found {}",
                    COORDINATE_FIELDS,
                    fields.len()
                ),
            }
            .into());
        }

        let (ecosystem, group, artifact, version) = (fields[0], fields[1], fields[2], fields[3]);
        if ecosystem.is_empty() {
            return Err(ScanError::InvalidCoordinate {
                coordinate: coordinate.to_string(),
                reason: "ecosystem cannot be empty".to_string(),
            }
            .into());
        }
        if version.is_empty() {
            return Err(ScanError::InvalidCoordinate {
                coordinate: coordinate.to_string(),
                reason: "version cannot be empty".to_string(),
            }
            .into());
        }

        Ok(Self {
            ecosystem: ecosystem.to_string(),
            group: group.to_string(),
            artifact: artifact.to_string(),
            version: version.to_string(),
        })
    }

    pub fn ecosystem(&self) -> &str {
        &self.ecosystem
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Name stored in the `pname` property of the package-version vertex
    ///
    /// `group:artifact` when both are present, otherwise whichever part is
    /// present. This differs from the legacy registration service, which
    /// stored an empty name unless both parts were set: there
    /// `npm::lodash:4.0.0` and `maven::commons-io:2.6` matched no vertex,
    /// here they look up `lodash` and `commons-io`.
    pub fn graph_name(&self) -> String {
        match (self.group.is_empty(), self.artifact.is_empty()) {
            (false, false) => format!("{}:{}", self.group, self.artifact),
            (true, false) => self.artifact.clone(),
            (false, true) => self.group.clone(),
            (true, true) => String::new(),
        }
    }

    pub fn lookup_key(&self) -> PackageVersionKey {
        PackageVersionKey::new(&self.ecosystem, &self.graph_name(), &self.version)
    }
}

impl fmt::Display for PackageCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.ecosystem, self.group, self.artifact, self.version
        )
    }
}

/// Identity of a package-version vertex: (ecosystem, name, version)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageVersionKey {
    pub ecosystem: String,
    pub name: String,
    pub version: String,
}

impl PackageVersionKey {
    pub fn new(ecosystem: &str, name: &str, version: &str) -> Self {
        Self {
            ecosystem: ecosystem.to_string(),
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    /// `ecosystem:name:version`, the form the report filter compares
    pub fn joined(&self) -> String {
        format!("{}:{}:{}", self.ecosystem, self.name, self.version)
    }
}
