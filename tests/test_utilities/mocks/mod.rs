/// Mock implementations for testing
mod mock_graph_store;
mod mock_progress_reporter;

pub use mock_graph_store::MockGraphStore;
pub use mock_progress_reporter::MockProgressReporter;
