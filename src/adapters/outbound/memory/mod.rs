/// In-process graph store, used for tests and offline runs
mod in_memory_graph_store;

pub use in_memory_graph_store::InMemoryGraphStore;
