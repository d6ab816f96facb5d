use crate::vulnerability_report::domain::{
    DependencyList, PackageVersionKey, RepositoryReport, TraversalRow, VulnerableDependency,
};
use crate::vulnerability_report::policies::MembershipFilter;
use crate::shared::Result;
use std::collections::HashMap;

/// ReportAggregator service turning traversal rows into per-repository reports
///
/// Pure transformation: no graph access, no mutation of its inputs.
pub struct ReportAggregator;

impl ReportAggregator {
    /// Builds one report per distinct repository URL, in first-seen order
    ///
    /// A row contributes an entry when its package version carries at least
    /// one CVE annotation and passes `filter`. Rows of an already-seen
    /// repository prepend their entries to that repository's list. The first
    /// row of a repository creates its report even when it contributes
    /// nothing, so a repository whose dependencies are all clean still
    /// appears with an empty list.
    ///
    /// # Errors
    /// Returns `LookupAnomaly` when a row lacks `repo_url`, `pecosystem`,
    /// `pname` or `version`.
    pub fn build_report(
        rows: &[TraversalRow],
        dependencies: &DependencyList,
        filter: MembershipFilter,
    ) -> Result<Vec<RepositoryReport>> {
        let submitted_keys = match filter {
            MembershipFilter::SubmittedOnly => dependencies.lookup_keys()?,
            MembershipFilter::Disabled => Default::default(),
        };

        let mut reports: Vec<RepositoryReport> = Vec::new();
        let mut index_by_url: HashMap<String, usize> = HashMap::new();

        for row in rows {
            let repo_url = row.repo_url()?;
            let entries = Self::vulnerable_entries(row, |key| {
                filter.admits(&key.joined(), &submitted_keys)
            })?;

            match index_by_url.get(repo_url) {
                Some(&index) => {
                    let existing = &mut reports[index].vulnerable_deps;
                    existing.splice(0..0, entries);
                }
                None => {
                    index_by_url.insert(repo_url.to_string(), reports.len());
                    reports.push(RepositoryReport::new(repo_url, entries));
                }
            }
        }

        Ok(reports)
    }

    /// Entries contributed by a single row: zero or one vulnerable dependency
    fn vulnerable_entries<F>(row: &TraversalRow, admits: F) -> Result<Vec<VulnerableDependency>>
    where
        F: Fn(&PackageVersionKey) -> bool,
    {
        let key = PackageVersionKey::new(row.ecosystem()?, row.name()?, row.version()?);
        let annotations = row.cve_annotations();

        if annotations.is_empty() || !admits(&key) {
            return Ok(Vec::new());
        }

        Ok(vec![VulnerableDependency::new(
            &key.ecosystem,
            &key.name,
            &key.version,
            annotations,
            row.edge.is_transitive(),
        )])
    }
}
