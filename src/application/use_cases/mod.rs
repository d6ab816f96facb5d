/// Use cases module containing application business logic orchestration
mod scan_repository;
mod synchronize_graph;

pub use scan_repository::{ScanOutcome, ScanRepositoryUseCase, DEFAULT_CONCURRENCY};
pub use synchronize_graph::GraphSynchronizer;
