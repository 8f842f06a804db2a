use crate::ingestion::domain::SchemaEntry;
use crate::shared::error::IngestError;
use std::path::Path;

/// OntologyReader port for loading schema entries
pub trait OntologyReader {
    /// Reads the schema entries listed in `path`
    ///
    /// # Errors
    /// Returns [`IngestError::OntologyLoad`] if the file cannot be read or
    /// parsed.
    fn read_ontology(&self, path: &Path) -> Result<Vec<SchemaEntry>, IngestError>;
}
