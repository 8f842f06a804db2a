use crate::application::dto::{IngestRequest, IngestResponse};
use crate::ingestion::domain::{DocumentId, GraphSnapshot, LicenseCorpus, SbomDocument, Statement};
use crate::ingestion::registry::{InstallGuard, SchemaRegistry};
use crate::ingestion::services::{
    DocumentBatch, DocumentNormalizer, LicenseRewrite, LoadDecision, LoadOutcome,
    RunMetadataGenerator, TransactionalGraphLoader,
};
use crate::ports::outbound::{GraphStore, ProgressReporter, SbomSource, StatementConverter};
use crate::shared::error::IngestError;
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Raw bytes fetched for one document, or why they could not be fetched
type Fetched = (DocumentId, std::result::Result<Vec<u8>, IngestError>);

/// IngestSbomsUseCase - Core use case for SBOM ingestion
///
/// Acquires SBOMs for a list of repositories, normalizes their license
/// fields against a corpus, converts them to statements and folds them into
/// the graph one document per transaction.
///
/// # Type Parameters
/// * `S` - SbomSource implementation
/// * `C` - StatementConverter implementation
/// * `G` - GraphStore implementation
/// * `PR` - ProgressReporter implementation
pub struct IngestSbomsUseCase<S, C, G, PR> {
    sbom_source: S,
    statement_converter: C,
    graph_store: G,
    progress_reporter: PR,
    registry: Arc<SchemaRegistry>,
    corpus: LicenseCorpus,
    normalizer: DocumentNormalizer,
}

impl<S, C, G, PR> IngestSbomsUseCase<S, C, G, PR>
where
    S: SbomSource,
    C: StatementConverter,
    G: GraphStore,
    PR: ProgressReporter,
{
    /// Creates a new IngestSbomsUseCase with injected dependencies
    pub fn new(
        sbom_source: S,
        statement_converter: C,
        graph_store: G,
        progress_reporter: PR,
        registry: Arc<SchemaRegistry>,
        corpus: LicenseCorpus,
        normalizer: DocumentNormalizer,
    ) -> Self {
        Self {
            sbom_source,
            statement_converter,
            graph_store,
            progress_reporter,
            registry,
            corpus,
            normalizer,
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Executes the ingestion use case
    ///
    /// # Arguments
    /// * `request` - Sources, credential, ontology and run options
    ///
    /// # Returns
    /// IngestResponse with the last good snapshot and every per-document failure
    ///
    /// # Errors
    /// Fails only when the ontology conflicts with the registry. Document
    /// failures never fail the run; they are listed in the response.
    pub async fn execute(&self, request: IngestRequest) -> Result<IngestResponse> {
        let metadata = RunMetadataGenerator::generate_default();

        // Step 1: Install the ontology for the duration of the run
        let guard = self.install_ontology(&request)?;

        // Step 2: Acquire every document, in request order
        let fetched = self.acquire_documents(&request).await;

        // Step 3: Normalize license fields and convert to statements
        let (batches, rewrites) = self.prepare_batches(fetched, request.min_confidence);

        // Step 4: Fold the documents into the graph
        let outcome = self.load_batches(request.initial_snapshot, batches, request.fail_fast);

        // Step 5: Restore the registry
        drop(guard);

        self.report_outcome(&outcome);

        // Step 6: Build and return response
        Ok(IngestResponse {
            snapshot: outcome.snapshot,
            merged: outcome.merged,
            failures: outcome.failures,
            rewrites,
            metadata,
            aborted: outcome.aborted,
        })
    }

    /// Installs the request's ontology, returning the guard that removes it
    fn install_ontology(
        &self,
        request: &IngestRequest,
    ) -> std::result::Result<InstallGuard<'_>, IngestError> {
        let guard = self.registry.install_scoped(request.ontology.clone())?;
        self.progress_reporter.report(&format!(
            "📚 Installed {} schema entries",
            guard.entries().len()
        ));
        Ok(guard)
    }

    /// Fetches all sources with bounded concurrency
    ///
    /// # Arguments
    /// * `request` - Provides the sources, token and concurrency limit
    ///
    /// # Returns
    /// One entry per source, in the order the sources were given
    async fn acquire_documents(&self, request: &IngestRequest) -> Vec<Fetched> {
        let total = request.sources.len();
        if total == 0 {
            self.progress_reporter
                .report("⚠️  Warning: No sources given, nothing to ingest");
            return Vec::new();
        }

        self.progress_reporter
            .report(&format!("🌐 Fetching {} SBOM(s)...", total));

        let token = request.token.as_deref();
        let completed = AtomicUsize::new(0);
        let limit = request.max_concurrent_fetches.max(1);

        let fetched: Vec<Fetched> = stream::iter(&request.sources)
            .map(|source| {
                let completed = &completed;
                async move {
                    let result = self.sbom_source.fetch(source, token).await;
                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    self.progress_reporter
                        .report_progress(done, total, Some(&source.to_string()));
                    (source.document_id(), result)
                }
            })
            .buffered(limit)
            .collect()
            .await;

        let ok = fetched.iter().filter(|(_, result)| result.is_ok()).count();
        self.progress_reporter
            .report_completion(&format!("Fetched {}/{} SBOM(s)", ok, total));

        fetched
    }

    /// Turns fetched bytes into batches for the loader
    ///
    /// Acquisition, parse and conversion errors become failed batches so
    /// the loader reports them alongside merge conflicts.
    fn prepare_batches(
        &self,
        fetched: Vec<Fetched>,
        min_confidence: f64,
    ) -> (Vec<DocumentBatch>, Vec<LicenseRewrite>) {
        let mut batches = Vec::with_capacity(fetched.len());
        let mut rewrites = Vec::new();

        for (document, result) in fetched {
            let statements = result.and_then(|bytes| {
                self.prepare_document(document.clone(), &bytes, min_confidence, &mut rewrites)
            });
            batches.push(match statements {
                Ok(statements) => DocumentBatch::converted(document, statements),
                Err(error) => DocumentBatch::failed(document, error),
            });
        }

        (batches, rewrites)
    }

    fn prepare_document(
        &self,
        document: DocumentId,
        bytes: &[u8],
        min_confidence: f64,
        rewrites: &mut Vec<LicenseRewrite>,
    ) -> std::result::Result<Vec<Statement>, IngestError> {
        let mut sbom = SbomDocument::from_bytes(document, bytes)?;

        let document_rewrites = self.normalizer.normalize(&mut sbom, &self.corpus);
        for rewrite in document_rewrites
            .iter()
            .filter(|rewrite| rewrite.score < min_confidence)
        {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {}: '{}' resolved to '{}' with low confidence ({:.2})",
                rewrite.document, rewrite.original, rewrite.resolved, rewrite.score
            ));
        }
        rewrites.extend(document_rewrites);

        self.statement_converter.convert(&sbom, &self.registry)
    }

    /// Merges the batches one transaction at a time
    ///
    /// # Arguments
    /// * `initial` - Snapshot the fold starts from
    /// * `batches` - Documents in merge order
    /// * `fail_fast` - Abort at the first failure instead of skipping it
    fn load_batches(
        &self,
        initial: GraphSnapshot,
        batches: Vec<DocumentBatch>,
        fail_fast: bool,
    ) -> LoadOutcome {
        let total = batches.len();
        let registry = self.registry.as_ref();
        let batches = batches.into_iter().enumerate().map(|(index, batch)| {
            self.progress_reporter
                .report_progress(index + 1, total, Some(&format!("merging {}", batch.document)));
            batch
        });
        let loader =
            TransactionalGraphLoader::new(|snapshot: &GraphSnapshot, statements: &[Statement]| {
                self.graph_store.merge(snapshot, statements, registry)
            });

        loader.load_with(initial, batches, |failure| {
            self.progress_reporter
                .report_error(&format!("⚠️  Warning: {}", failure));
            if fail_fast {
                LoadDecision::Abort
            } else {
                LoadDecision::Continue
            }
        })
    }

    fn report_outcome(&self, outcome: &LoadOutcome) {
        if outcome.aborted {
            self.progress_reporter
                .report_error("❌ Run aborted after the first failed document");
            return;
        }
        self.progress_reporter.report_completion(&format!(
            "Merged {} document(s), {} failed ({} entities)",
            outcome.merged.len(),
            outcome.failures.len(),
            outcome.snapshot.entity_count()
        ));
    }
}
