use crate::ingestion::domain::SourceRef;
use crate::ports::outbound::SbomSource;
use crate::shared::error::{AcquisitionErrorKind, IngestError};
use crate::shared::security::{read_regular_file, MAX_FILE_SIZE};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// LocalSbomSource adapter reading SBOMs exported to disk
///
/// Documents live at `<root>/<owner>/<repo>.json`. Owner and repository are
/// validated by [`SourceRef`], so the path never leaves `root`. The token is
/// ignored.
pub struct LocalSbomSource {
    root: PathBuf,
}

impl LocalSbomSource {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, source: &SourceRef) -> PathBuf {
        self.root
            .join(source.owner())
            .join(format!("{}.json", source.repo()))
    }
}

#[async_trait]
impl SbomSource for LocalSbomSource {
    async fn fetch(&self, source: &SourceRef, _token: Option<&str>) -> Result<Vec<u8>, IngestError> {
        let path = self.path_for(source);
        read_regular_file(&path, "SBOM", MAX_FILE_SIZE).map_err(|e| IngestError::Acquisition {
            source_ref: source.to_string(),
            kind: AcquisitionErrorKind::Network,
            details: e.to_string(),
        })
    }
}
