/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (graph store, file system, console).
pub mod graph_store;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_formatter;
pub mod scan_request_reader;

pub use graph_store::GraphStore;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
pub use scan_request_reader::ScanRequestReader;
