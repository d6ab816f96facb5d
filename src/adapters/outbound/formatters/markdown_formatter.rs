use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use crate::vulnerability_report::domain::{RepositoryReport, ScanMetadata, VulnerableDependency};

/// Markdown table header for vulnerable dependencies
const TABLE_HEADER: &str = "| Package | Version | Ecosystem | Scope | CVEs | Max CVSS |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|---------|---------|-----------|-------|------|----------|\n";

/// MarkdownReportFormatter adapter rendering a human readable report
pub struct MarkdownReportFormatter;

impl MarkdownReportFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn render_header(&self, output: &mut String, reports: &[RepositoryReport], metadata: &ScanMetadata) {
        output.push_str("# Vulnerability Report\n\n");
        output.push_str(&format!("- Generated: {}\n", metadata.timestamp()));
        output.push_str(&format!(
            "- Tool: {} {}\n",
            metadata.tool_name(),
            metadata.tool_version()
        ));
        output.push_str(&format!("- Scan ID: {}\n", metadata.scan_id()));

        let vulnerable = reports.iter().filter(|r| r.has_vulnerabilities()).count();
        let total_cves: usize = reports.iter().map(RepositoryReport::total_cves).sum();
        output.push_str(&format!(
            "- Repositories: {} ({} with vulnerable dependencies, {} CVEs)\n\n",
            reports.len(),
            vulnerable,
            total_cves
        ));
    }

    fn render_repository(&self, output: &mut String, report: &RepositoryReport) {
        output.push_str(&format!(
            "## {}\n\n",
            Self::escape_markdown_table_cell(&report.repo_url)
        ));

        if !report.has_vulnerabilities() {
            output.push_str("No vulnerable dependencies found.\n\n");
            return;
        }

        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for dependency in &report.vulnerable_deps {
            output.push_str(&Self::render_row(dependency));
        }
        output.push('\n');
    }

    fn render_row(dependency: &VulnerableDependency) -> String {
        let scope = if dependency.is_transitive {
            "transitive"
        } else {
            "direct"
        };
        let cves = dependency
            .cves
            .iter()
            .map(|c| format!("{} ({})", c.cve, c.cvss))
            .collect::<Vec<_>>()
            .join(", ");
        let max_cvss = dependency
            .max_cvss()
            .map(|score| format!("{:.1}", score))
            .unwrap_or_else(|| "N/A".to_string());

        format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            Self::escape_markdown_table_cell(&dependency.name),
            Self::escape_markdown_table_cell(&dependency.version),
            Self::escape_markdown_table_cell(&dependency.ecosystem),
            scope,
            Self::escape_markdown_table_cell(&cves),
            max_cvss
        )
    }
}

impl Default for MarkdownReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownReportFormatter {
    fn format(&self, reports: &[RepositoryReport], metadata: &ScanMetadata) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, reports, metadata);

        if reports.is_empty() {
            output.push_str("No repository has linked dependencies.\n");
        }
        for report in reports {
            self.render_repository(&mut output, report);
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> ScanMetadata {
        ScanMetadata::new(
            "2024-01-01T00:00:00Z".to_string(),
            "repo-cve-scan".to_string(),
            "0.1.0".to_string(),
            "urn:uuid:1234".to_string(),
        )
    }

    #[test]
    fn test_format_header_and_summary() {
        let reports = vec![
            RepositoryReport::new(
                "github.com/x/y",
                vec![VulnerableDependency::new(
                    "npm",
                    "lodash",
                    "4.0.0",
                    &["CVE-2020-8203:7.4".to_string(), "CVE-2019-10744:9.1".to_string()],
                    true,
                )],
            ),
            RepositoryReport::new("github.com/a/b", vec![]),
        ];

        let output = MarkdownReportFormatter::new()
            .format(&reports, &metadata())
            .unwrap();

        assert!(output.starts_with("# Vulnerability Report\n"));
        assert!(output.contains("- Scan ID: urn:uuid:1234"));
        assert!(output.contains("- Repositories: 2 (1 with vulnerable dependencies, 2 CVEs)"));
        assert!(output.contains("## github.com/x/y"));
        assert!(output.contains(
            "| lodash | 4.0.0 | npm | transitive | CVE-2020-8203 (7.4), CVE-2019-10744 (9.1) | 9.1 |"
        ));
        assert!(output.contains("## github.com/a/b\n\nNo vulnerable dependencies found."));
    }

    #[test]
    fn test_format_empty() {
        let output = MarkdownReportFormatter::new().format(&[], &metadata()).unwrap();
        assert!(output.contains("No repository has linked dependencies."));
    }

    #[test]
    fn test_non_numeric_score_renders_na() {
        let dependency = VulnerableDependency::new(
            "maven",
            "a|b",
            "1.0",
            &["CVE-2024-0001".to_string()],
            false,
        );
        let row = MarkdownReportFormatter::render_row(&dependency);
        assert_eq!(
            row,
            "| a\\|b | 1.0 | maven | direct | CVE-2024-0001 (CVE-2024-0001) | N/A |\n"
        );
    }
}
