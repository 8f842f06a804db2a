use async_trait::async_trait;
use sbom_ingest::prelude::*;
use sbom_ingest::shared::error::AcquisitionErrorKind;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock SbomSource serving documents from memory
#[derive(Clone, Default)]
pub struct MockSbomSource {
    documents: HashMap<String, Vec<u8>>,
    denied: Vec<String>,
    calls: Arc<AtomicUsize>,
}

impl MockSbomSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, source: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(source.to_string(), bytes.into());
        self
    }

    /// Loads `<fixtures>/sboms/<source>.json`
    pub fn with_fixture(self, source: &str) -> Self {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures/sboms")
            .join(format!("{}.json", source));
        let bytes = std::fs::read(path).unwrap();
        self.with_document(source, bytes)
    }

    /// Makes `source` fail as if the token were rejected
    pub fn with_denied(mut self, source: &str) -> Self {
        self.denied.push(source.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SbomSource for MockSbomSource {
    async fn fetch(
        &self,
        source: &SourceRef,
        _token: Option<&str>,
    ) -> std::result::Result<Vec<u8>, IngestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = source.to_string();

        if self.denied.contains(&key) {
            return Err(IngestError::Acquisition {
                source_ref: key,
                kind: AcquisitionErrorKind::Auth,
                details: "HTTP 403 Forbidden".to_string(),
            });
        }

        self.documents
            .get(&key)
            .cloned()
            .ok_or_else(|| IngestError::Acquisition {
                source_ref: key,
                kind: AcquisitionErrorKind::Network,
                details: "HTTP 404 Not Found".to_string(),
            })
    }
}
