/// Type alias for Result with anyhow::Error as the error type.
/// Run-level code uses this; ports whose failures must stay distinguishable
/// return `Result<T, IngestError>` instead.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
