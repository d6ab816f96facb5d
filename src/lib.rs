//! repo-cve-scan - repository dependency graph synchronization and CVE reporting
//!
//! Records a repository's resolved dependency list as edges in a Gremlin
//! graph (repository vertex to package-version vertices) and reports the
//! package versions carrying known CVEs, following hexagonal architecture.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`vulnerability_report`): coordinates, sync plans, traversal rows and report aggregation
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use repo_cve_scan::prelude::*;
//! use std::time::Duration;
//!
//! # async fn scan() -> Result<()> {
//! let graph_store = GremlinGraphStore::new("http://localhost:8182", Duration::from_secs(30))?;
//! let use_case = ScanRepositoryUseCase::new(graph_store, StderrProgressReporter::new());
//!
//! let request = ScanRequest::new(
//!     "github.com/x/y",
//!     DependencyList::new(vec!["npm::lodash:4.0.0".to_string()], vec![]),
//! );
//! let response = use_case.execute(request).await?;
//!
//! let metadata = MetadataGenerator::generate_default_metadata();
//! let output = JsonReportFormatter::new().format(&response.reports, &metadata)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod shared;
pub mod vulnerability_report;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonReportFormatter, MarkdownReportFormatter};
    pub use crate::adapters::outbound::memory::InMemoryGraphStore;
    pub use crate::adapters::outbound::network::GremlinGraphStore;
    pub use crate::application::dto::{OutputFormat, ScanRequest, ScanResponse};
    pub use crate::application::use_cases::{GraphSynchronizer, ScanOutcome, ScanRepositoryUseCase};
    pub use crate::ports::outbound::{
        GraphStore, OutputPresenter, ProgressReporter, ReportFormatter, ScanRequestReader,
    };
    pub use crate::shared::error::{GraphStoreError, ScanError};
    pub use crate::shared::Result;
    pub use crate::vulnerability_report::domain::{
        DependencyEdgeLabel, DependencyList, PackageCoordinate, RepositoryReport, SyncPlan,
        TraversalResult, TraversalRow, VulnerableDependency,
    };
    pub use crate::vulnerability_report::policies::MembershipFilter;
    pub use crate::vulnerability_report::services::{MetadataGenerator, ReportAggregator};
}
