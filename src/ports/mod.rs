/// Ports module defining interfaces for hexagonal architecture
///
/// Only outbound (driven) ports exist: the single driving entry point is the
/// `IngestSbomsUseCase` itself.
pub mod outbound;
