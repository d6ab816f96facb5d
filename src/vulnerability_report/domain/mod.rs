pub mod coordinate;
pub mod dependency_list;
pub mod edge_label;
pub mod graph_record;
pub mod scan_metadata;
pub mod sync_plan;
pub mod vulnerability;

pub use coordinate::{PackageCoordinate, PackageVersionKey};
pub use dependency_list::DependencyList;
pub use edge_label::DependencyEdgeLabel;
pub use graph_record::{property, EdgeRecord, TraversalResult, TraversalRow, VertexProperties};
pub use scan_metadata::ScanMetadata;
pub use sync_plan::{EdgeRequest, SyncPlan};
pub use vulnerability::{CveScore, RepositoryReport, VulnerableDependency};
