/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod console;
pub mod conversion;
pub mod filesystem;
pub mod graph;
pub mod network;
