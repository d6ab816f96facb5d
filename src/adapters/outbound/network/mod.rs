/// Network adapters for the graph database
mod gremlin_client;
mod gremlin_protocol;

pub use gremlin_client::{GremlinGraphStore, DEFAULT_GREMLIN_URL, DEFAULT_TIMEOUT_SECS};
