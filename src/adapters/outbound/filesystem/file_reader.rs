use crate::ingestion::domain::{LicenseCorpus, SchemaEntry};
use crate::ports::outbound::{CorpusReader, OntologyReader};
use crate::shared::error::IngestError;
use crate::shared::security::{read_regular_file, MAX_FILE_SIZE};
use serde::Deserialize;
use std::path::Path;

/// Accepted corpus file shapes
#[derive(Deserialize)]
#[serde(untagged)]
enum CorpusFile {
    /// The SPDX license list (`licenses.json`)
    LicenseList { licenses: Vec<LicenseListEntry> },
    /// A plain array of identifiers
    Identifiers(Vec<String>),
}

#[derive(Deserialize)]
struct LicenseListEntry {
    #[serde(rename = "licenseId")]
    license_id: String,
}

/// FileSystemReader adapter for reading reference data from the file system
///
/// This adapter implements both CorpusReader and OntologyReader ports.
/// Every read goes through the shared security checks.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusReader for FileSystemReader {
    fn read_corpus(&self, path: &Path) -> Result<LicenseCorpus, IngestError> {
        let corpus_error = |details: String| IngestError::CorpusLoad {
            path: path.to_path_buf(),
            details,
        };

        let bytes = read_regular_file(path, "license corpus", MAX_FILE_SIZE)
            .map_err(|e| corpus_error(e.to_string()))?;

        let file: CorpusFile = serde_json::from_slice(&bytes).map_err(|e| {
            corpus_error(format!(
                "expected a license list object or an array of identifiers: {}",
                e
            ))
        })?;

        let ids = match file {
            CorpusFile::LicenseList { licenses } => {
                licenses.into_iter().map(|entry| entry.license_id).collect()
            }
            CorpusFile::Identifiers(ids) => ids,
        };

        LicenseCorpus::new(ids).map_err(|e| corpus_error(e.to_string()))
    }
}

impl OntologyReader for FileSystemReader {
    fn read_ontology(&self, path: &Path) -> Result<Vec<SchemaEntry>, IngestError> {
        let ontology_error = |details: String| IngestError::OntologyLoad {
            path: path.to_path_buf(),
            details,
        };

        let bytes = read_regular_file(path, "ontology", MAX_FILE_SIZE)
            .map_err(|e| ontology_error(e.to_string()))?;

        let text = std::str::from_utf8(&bytes).map_err(|e| ontology_error(e.to_string()))?;
        let entries: Vec<SchemaEntry> =
            serde_yaml_ng::from_str(text).map_err(|e| ontology_error(e.to_string()))?;

        if let Some(index) = entries.iter().position(|e| e.ident.trim().is_empty()) {
            return Err(ontology_error(format!("entry {} has an empty ident", index)));
        }

        Ok(entries)
    }
}
