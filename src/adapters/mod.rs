/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: graph stores, file I/O,
/// report formatters and console output.
pub mod outbound;
