/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod ingest_request;
mod ingest_response;

pub use ingest_request::{IngestRequest, DEFAULT_MAX_CONCURRENT_FETCHES, DEFAULT_MIN_CONFIDENCE};
pub use ingest_response::{FailureExport, IngestExport, IngestResponse};
