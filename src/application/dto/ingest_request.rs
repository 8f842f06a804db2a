use crate::ingestion::domain::{GraphSnapshot, SchemaEntry, SourceRef};

/// Default number of SBOM downloads in flight at once
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 4;

/// Default score below which a license rewrite is reported as low-confidence
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.85;

/// IngestRequest - Internal request DTO for the ingestion use case
#[derive(Debug, Clone)]
pub struct IngestRequest {
    /// Repositories to acquire SBOMs from, in merge order
    pub sources: Vec<SourceRef>,
    /// Credential forwarded to the SBOM source
    pub token: Option<String>,
    /// Ontology installed into the schema registry for this run only
    pub ontology: Vec<SchemaEntry>,
    /// Snapshot the run starts from
    pub initial_snapshot: GraphSnapshot,
    pub max_concurrent_fetches: usize,
    /// Rewrites scoring below this are reported as warnings
    pub min_confidence: f64,
    /// Stop at the first failed document instead of skipping it
    pub fail_fast: bool,
}

impl IngestRequest {
    pub fn new(sources: Vec<SourceRef>, ontology: Vec<SchemaEntry>) -> Self {
        Self {
            sources,
            token: None,
            ontology,
            initial_snapshot: GraphSnapshot::empty(),
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            fail_fast: false,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_initial_snapshot(mut self, snapshot: GraphSnapshot) -> Self {
        self.initial_snapshot = snapshot;
        self
    }

    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit;
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}
