use crate::vulnerability_report::domain::DependencyList;
use serde::{Deserialize, Serialize};

/// ScanRequest - one repository registration to synchronize and report on
///
/// Accepts the registration payload shape (`git-url`) as well as `repo_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    #[serde(rename = "git-url", alias = "repo_url")]
    pub repo_url: String,
    #[serde(default)]
    pub dependencies: DependencyList,
}

impl ScanRequest {
    pub fn new(repo_url: &str, dependencies: DependencyList) -> Self {
        Self {
            repo_url: repo_url.to_string(),
            dependencies,
        }
    }
}
