/// Integration tests for the application layer
mod test_utilities;

use sbom_ingest::shared::error::AcquisitionErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use test_utilities::mocks::*;

use sbom_ingest::prelude::*;

fn fixtures_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn corpus() -> LicenseCorpus {
    FileSystemReader::new()
        .read_corpus(&fixtures_path().join("licenses.json"))
        .unwrap()
}

fn sources(raw: &[&str]) -> Vec<SourceRef> {
    raw.iter().map(|s| SourceRef::parse(s).unwrap()).collect()
}

fn use_case<S: SbomSource>(
    source: S,
    reporter: MockProgressReporter,
    registry: Arc<SchemaRegistry>,
) -> IngestSbomsUseCase<S, SpdxStatementConverter, InMemoryGraphStore, MockProgressReporter> {
    IngestSbomsUseCase::new(
        source,
        SpdxStatementConverter::new(),
        InMemoryGraphStore::new(),
        reporter,
        registry,
        corpus(),
        DocumentNormalizer::new(LicenseResolver::default()),
    )
}

async fn ingest(source: MockSbomSource, raw: &[&str]) -> IngestResponse {
    use_case(
        source,
        MockProgressReporter::new(),
        Arc::new(SchemaRegistry::new()),
    )
    .execute(IngestRequest::new(sources(raw), spdx_ontology()))
    .await
    .unwrap()
}

fn keys(elements: &[sbom_ingest::ingestion::services::ElementView]) -> Vec<&str> {
    elements.iter().map(|e| e.key.as_str()).collect()
}

#[tokio::test]
async fn test_ingest_two_documents() {
    let source = MockSbomSource::new()
        .with_fixture("acme/widgets")
        .with_fixture("acme/gadgets");

    let response = ingest(source, &["acme/widgets", "acme/gadgets"]).await;

    assert!(!response.has_failures());
    assert_eq!(response.merged.len(), 2);
    assert_eq!(response.snapshot.tx(), 2);
    assert_eq!(response.exit_code(), ExitCode::Success);

    // "MIT License" and "Apache 2.0" were corrected
    let rewritten: Vec<(&str, &str)> = response
        .rewrites
        .iter()
        .map(|r| (r.original.as_str(), r.resolved.as_str()))
        .collect();
    assert_eq!(
        rewritten,
        vec![("MIT License", "MIT"), ("Apache 2.0", "Apache-2.0")]
    );
}

#[tokio::test]
async fn test_license_queries_see_direct_and_compound_licenses() {
    let source = MockSbomSource::new()
        .with_fixture("acme/widgets")
        .with_fixture("acme/gadgets");

    let response = ingest(source, &["acme/widgets", "acme/gadgets"]).await;

    let mit = GraphQueries::packages_with_license(&response.snapshot, "MIT");
    assert_eq!(
        keys(&mit),
        vec!["pkg:github/acme/widgets@main", "pkg:npm/left-pad@1.3.0"]
    );

    let apache = GraphQueries::packages_with_license(&response.snapshot, "Apache-2.0");
    assert_eq!(apache.len(), 2);
    assert!(keys(&apache).contains(&"pkg:github/acme/gadgets@main"));

    let summary = GraphQueries::license_summary(&response.snapshot);
    assert_eq!(summary.get("MIT"), Some(&1));
    assert_eq!(summary.get("Apache-2.0"), Some(&1));
    assert_eq!(summary.get("MIT OR Apache-2.0"), Some(&1));
    assert_eq!(summary.get("NOASSERTION"), None);
}

#[tokio::test]
async fn test_shared_package_is_upserted_across_documents() {
    let source = MockSbomSource::new()
        .with_fixture("acme/widgets")
        .with_fixture("acme/gadgets");

    let response = ingest(source, &["acme/widgets", "acme/gadgets"]).await;

    let dependents = GraphQueries::dependents_of(&response.snapshot, "pkg:npm/left-pad@1.3.0");
    let mut dependent_keys = keys(&dependents);
    dependent_keys.sort();
    assert_eq!(
        dependent_keys,
        vec!["pkg:github/acme/gadgets@main", "pkg:github/acme/widgets@main"]
    );

    let left_pad = GraphQueries::element(&response.snapshot, "pkg:npm/left-pad@1.3.0").unwrap();
    assert_eq!(left_pad.name.as_deref(), Some("npm:left-pad"));
    assert_eq!(left_pad.version.as_deref(), Some("1.3.0"));
}

#[tokio::test]
async fn test_failed_document_leaves_snapshot_of_good_documents() {
    let alone = ingest(MockSbomSource::new().with_fixture("acme/widgets"), &["acme/widgets"]).await;

    let source = MockSbomSource::new()
        .with_fixture("acme/widgets")
        .with_fixture("acme/broken");
    let response = ingest(source, &["acme/widgets", "acme/broken"]).await;

    assert_eq!(response.failures.len(), 1);
    assert_eq!(response.failures[0].document.as_str(), "acme/broken");
    assert!(response.failures[0].error.to_string().contains("spdxVersion"));
    assert_eq!(response.snapshot.tx(), alone.snapshot.tx());
    assert_eq!(response.snapshot.entity_count(), alone.snapshot.entity_count());
    assert_eq!(response.snapshot.fact_count(), alone.snapshot.fact_count());
    assert_eq!(response.exit_code(), ExitCode::DocumentsFailed);
}

#[tokio::test]
async fn test_auth_failure_is_recorded_per_document() {
    let source = MockSbomSource::new()
        .with_fixture("acme/widgets")
        .with_denied("acme/private");
    let reporter = MockProgressReporter::new();
    let use_case = use_case(
        source.clone(),
        reporter.clone(),
        Arc::new(SchemaRegistry::new()),
    );

    let response = use_case
        .execute(IngestRequest::new(
            sources(&["acme/private", "acme/widgets"]),
            spdx_ontology(),
        ))
        .await
        .unwrap();

    assert_eq!(source.call_count(), 2);
    assert_eq!(response.merged.len(), 1);
    assert!(matches!(
        response.failures[0].error,
        IngestError::Acquisition {
            kind: AcquisitionErrorKind::Auth,
            ..
        }
    ));
    assert!(reporter
        .errors()
        .iter()
        .any(|e| e.starts_with("⚠️  Warning:") && e.contains("acme/private")));
}

#[tokio::test]
async fn test_registry_is_clean_between_runs() {
    let registry = Arc::new(SchemaRegistry::new());
    let source = MockSbomSource::new().with_fixture("acme/widgets");

    for _ in 0..2 {
        let use_case = use_case(
            source.clone(),
            MockProgressReporter::new(),
            Arc::clone(&registry),
        );
        let response = use_case
            .execute(IngestRequest::new(sources(&["acme/widgets"]), spdx_ontology()))
            .await
            .unwrap();
        assert!(!response.has_failures());
        assert_eq!(registry.rule_count(), 0);
    }
}

#[tokio::test]
async fn test_ontology_file_matches_builtin_ontology() {
    let ontology = FileSystemReader::new()
        .read_ontology(&fixtures_path().join("ontology.yml"))
        .unwrap();
    assert_eq!(ontology, spdx_ontology());

    let source = MockSbomSource::new().with_fixture("acme/widgets");
    let response = use_case(
        source,
        MockProgressReporter::new(),
        Arc::new(SchemaRegistry::new()),
    )
    .execute(IngestRequest::new(sources(&["acme/widgets"]), ontology))
    .await
    .unwrap();
    assert!(!response.has_failures());
}

#[tokio::test]
async fn test_local_source_reads_fixture_directory() {
    let source = LocalSbomSource::new(fixtures_path().join("sboms"));
    let response = use_case(
        source,
        MockProgressReporter::new(),
        Arc::new(SchemaRegistry::new()),
    )
    .execute(IngestRequest::new(
        sources(&["acme/widgets", "acme/nothing-here"]),
        spdx_ontology(),
    ))
    .await
    .unwrap();

    assert_eq!(response.merged, vec![DocumentId::new("acme/widgets")]);
    assert_eq!(response.failures.len(), 1);
    assert!(matches!(
        response.failures[0].error,
        IngestError::Acquisition { .. }
    ));
}

#[tokio::test]
async fn test_progress_messages_are_reported() {
    let reporter = MockProgressReporter::new();
    let source = MockSbomSource::new().with_fixture("acme/widgets");

    use_case(source, reporter.clone(), Arc::new(SchemaRegistry::new()))
        .execute(IngestRequest::new(sources(&["acme/widgets"]), spdx_ontology()))
        .await
        .unwrap();

    let messages = reporter.get_messages();
    assert!(messages.iter().any(|m| m.contains("Installed 21 schema entries")));
    assert!(messages.iter().any(|m| m.starts_with("Progress: 1/1 - acme/widgets")));
    assert!(messages.iter().any(|m| m.starts_with("Completed: Merged 1 document(s)")));
}
