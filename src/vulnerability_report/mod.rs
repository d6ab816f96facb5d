//! Domain layer: graph records, sync plans and report aggregation.
//!
//! Nothing in here performs I/O; the graph store is reached only through
//! the `GraphStore` port.
pub mod domain;
pub mod policies;
pub mod services;
