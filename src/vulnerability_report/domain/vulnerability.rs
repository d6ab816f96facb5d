use serde::{Deserialize, Serialize};

/// CVE identifier with its CVSS score, as reported to consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CveScore {
    #[serde(rename = "CVE")]
    pub cve: String,
    #[serde(rename = "CVSS")]
    pub cvss: String,
}

impl CveScore {
    pub fn new(cve: &str, cvss: &str) -> Self {
        Self {
            cve: cve.to_string(),
            cvss: cvss.to_string(),
        }
    }

    /// Parses a `cve_ids` annotation such as `CVE-2021-1234:HIGH:7.5`
    ///
    /// The first `:`-separated token is the identifier and the last one the
    /// score; anything in between is ignored. An annotation without `:` uses
    /// the whole string for both.
    pub fn parse_annotation(annotation: &str) -> Self {
        let cve = annotation.split(':').next().unwrap_or(annotation);
        let cvss = annotation.rsplit(':').next().unwrap_or(annotation);
        Self::new(cve, cvss)
    }

    /// Numeric CVSS score, when the annotation carries one
    pub fn cvss_value(&self) -> Option<f32> {
        self.cvss.trim().parse().ok()
    }
}

/// One vulnerable dependency of one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerableDependency {
    pub ecosystem: String,
    pub name: String,
    pub version: String,
    pub cve_count: usize,
    pub cves: Vec<CveScore>,
    pub is_transitive: bool,
}

impl VulnerableDependency {
    pub fn new(
        ecosystem: &str,
        name: &str,
        version: &str,
        annotations: &[String],
        is_transitive: bool,
    ) -> Self {
        Self {
            ecosystem: ecosystem.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            cve_count: annotations.len(),
            cves: annotations
                .iter()
                .map(|a| CveScore::parse_annotation(a))
                .collect(),
            is_transitive,
        }
    }

    /// Highest numeric CVSS score among the CVEs
    pub fn max_cvss(&self) -> Option<f32> {
        self.cves
            .iter()
            .filter_map(CveScore::cvss_value)
            .fold(None, |max, score| match max {
                Some(m) if m >= score => Some(m),
                _ => Some(score),
            })
    }
}

/// Vulnerable dependencies of a single repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryReport {
    pub repo_url: String,
    pub vulnerable_deps: Vec<VulnerableDependency>,
}

impl RepositoryReport {
    pub fn new(repo_url: &str, vulnerable_deps: Vec<VulnerableDependency>) -> Self {
        Self {
            repo_url: repo_url.to_string(),
            vulnerable_deps,
        }
    }

    pub fn has_vulnerabilities(&self) -> bool {
        !self.vulnerable_deps.is_empty()
    }

    pub fn total_cves(&self) -> usize {
        self.vulnerable_deps.iter().map(|d| d.cve_count).sum()
    }
}
