use crate::ingestion::domain::LicenseCorpus;
use crate::shared::error::IngestError;
use std::path::Path;

/// CorpusReader port for loading the canonical license vocabulary
pub trait CorpusReader {
    /// Reads a license corpus from `path`
    ///
    /// # Errors
    /// Returns [`IngestError::CorpusLoad`] if the file cannot be read or
    /// holds duplicate or empty identifiers.
    fn read_corpus(&self, path: &Path) -> Result<LicenseCorpus, IngestError>;
}
