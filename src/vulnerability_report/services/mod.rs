mod metadata_generator;
mod report_aggregator;

pub use metadata_generator::MetadataGenerator;
pub use report_aggregator::ReportAggregator;
