use crate::adapters::outbound::formatters::{JsonReportFormatter, MarkdownReportFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// Encapsulates the choice of formatter adapter for an output format.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use repo_cve_scan::application::dto::OutputFormat;
    /// use repo_cve_scan::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonReportFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownReportFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use repo_cve_scan::application::dto::OutputFormat;
    /// use repo_cve_scan::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Generating JSON report...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Generating JSON report...",
            OutputFormat::Markdown => "📝 Generating Markdown report...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vulnerability_report::services::MetadataGenerator;

    #[test]
    fn test_create_json_formatter_emits_json() {
        let formatter = FormatterFactory::create(OutputFormat::Json);
        let output = formatter
            .format(&[], &MetadataGenerator::generate_default_metadata())
            .unwrap();
        assert_eq!(output.trim(), "[]");
    }

    #[test]
    fn test_create_markdown_formatter_emits_markdown() {
        let formatter = FormatterFactory::create(OutputFormat::Markdown);
        let output = formatter
            .format(&[], &MetadataGenerator::generate_default_metadata())
            .unwrap();
        assert!(output.starts_with("# Vulnerability Report"));
    }

    #[test]
    fn test_progress_message_markdown() {
        let message = FormatterFactory::progress_message(OutputFormat::Markdown);
        assert_eq!(message, "📝 Generating Markdown report...");
    }
}
