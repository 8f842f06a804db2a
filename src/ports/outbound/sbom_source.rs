use crate::ingestion::domain::SourceRef;
use crate::shared::error::IngestError;
use async_trait::async_trait;

/// SbomSource port for acquiring raw SBOM documents
///
/// This port abstracts where documents come from (the GitHub dependency
/// graph API, a local directory, a test double).
///
/// # Async Support
/// Fetches for different sources may run concurrently, so implementations
/// must be `Send + Sync`.
#[async_trait]
pub trait SbomSource: Send + Sync {
    /// Fetches the raw document bytes for `source`
    ///
    /// # Arguments
    /// * `source` - The (owner, repository) pair to fetch
    /// * `token` - Optional credential passed through to the backend
    ///
    /// # Errors
    /// Returns [`IngestError::Acquisition`] with kind `Network` on transport
    /// failures and kind `Auth` when the credential is missing or rejected.
    async fn fetch(&self, source: &SourceRef, token: Option<&str>) -> Result<Vec<u8>, IngestError>;
}
