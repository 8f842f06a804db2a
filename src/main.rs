mod cli;
mod config;

use anyhow::bail;
use cli::Args;
use config::{discover_config, load_config_from_path, ConfigFile};
use sbom_ingest::adapters::outbound::console::StderrProgressReporter;
use sbom_ingest::adapters::outbound::conversion::SpdxStatementConverter;
use sbom_ingest::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemWriter, LocalSbomSource, StdoutPresenter,
};
use sbom_ingest::adapters::outbound::graph::InMemoryGraphStore;
use sbom_ingest::adapters::outbound::network::{CachingSbomSource, GitHubSbomClient};
use sbom_ingest::application::dto::{
    IngestRequest, IngestResponse, DEFAULT_MAX_CONCURRENT_FETCHES, DEFAULT_MIN_CONFIDENCE,
};
use sbom_ingest::application::use_cases::IngestSbomsUseCase;
use sbom_ingest::ingestion::domain::{spdx_ontology, LicenseCorpus, SourceRef};
use sbom_ingest::ingestion::registry::SchemaRegistry;
use sbom_ingest::ingestion::services::{
    DocumentNormalizer, ElementView, GraphQueries, LicenseResolver, SimilarityScorer,
    DEFAULT_DAMPENING_WEIGHT,
};
use sbom_ingest::ports::outbound::{CorpusReader, OntologyReader, OutputPresenter, SbomSource};
use sbom_ingest::shared::error::ExitCode;
use sbom_ingest::shared::Result;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };

    process::exit(exit_code.as_i32());
}

async fn run() -> Result<ExitCode> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Load configuration (explicit path or auto-discovery)
    let config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => discover_config(&std::env::current_dir()?)?.unwrap_or_default(),
    };

    // CLI sources replace config sources
    let sources = resolve_sources(&args, &config)?;
    let min_confidence = resolve_min_confidence(&args, &config)?;

    // Load corpus and ontology
    let reader = FileSystemReader::new();
    let corpus_path = match args.corpus.clone().or_else(|| config.corpus.clone()) {
        Some(path) => path,
        None => bail!(
            "No license corpus given.\n\n💡 Hint: Pass --corpus <FILE> or set 'corpus' in {}",
            config::CONFIG_FILENAME
        ),
    };
    let corpus = reader.read_corpus(&corpus_path)?;
    let ontology = match args.ontology.clone().or_else(|| config.ontology.clone()) {
        Some(path) => reader.read_ontology(&path)?,
        None => spdx_ontology(),
    };

    let scorer =
        SimilarityScorer::new(config.dampening_weight.unwrap_or(DEFAULT_DAMPENING_WEIGHT))?;
    let mut normalizer = DocumentNormalizer::new(LicenseResolver::new(scorer));
    if let Some(fields) = &config.license_fields {
        normalizer = normalizer.with_fields(fields.iter().cloned());
    }

    let request = IngestRequest::new(sources, ontology)
        .with_token(args.token.clone())
        .with_fail_fast(args.fail_fast)
        .with_min_confidence(min_confidence)
        .with_max_concurrent_fetches(
            config
                .max_concurrent_fetches
                .unwrap_or(DEFAULT_MAX_CONCURRENT_FETCHES),
        );

    let documents_dir = args
        .documents_dir
        .clone()
        .or_else(|| config.documents_dir.clone());

    // Execute use case with the selected source
    let pipeline = Pipeline {
        corpus,
        normalizer,
        registry: Arc::new(SchemaRegistry::new()),
    };
    let response = match documents_dir {
        Some(dir) => pipeline.run(LocalSbomSource::new(dir), request).await?,
        None => {
            let client = GitHubSbomClient::new()?;
            pipeline.run(CachingSbomSource::new(client), request).await?
        }
    };

    present(&args, &response)?;
    run_queries(&args, &response)?;

    Ok(response.exit_code())
}

/// Run-wide collaborators shared by every source kind
struct Pipeline {
    corpus: LicenseCorpus,
    normalizer: DocumentNormalizer,
    registry: Arc<SchemaRegistry>,
}

impl Pipeline {
    async fn run<S: SbomSource>(self, source: S, request: IngestRequest) -> Result<IngestResponse> {
        let use_case = IngestSbomsUseCase::new(
            source,
            SpdxStatementConverter::new(),
            InMemoryGraphStore::new(),
            StderrProgressReporter::new(),
            self.registry,
            self.corpus,
            self.normalizer,
        );
        use_case.execute(request).await
    }
}

fn resolve_sources(args: &Args, config: &ConfigFile) -> Result<Vec<SourceRef>> {
    let sources = if args.sources.is_empty() {
        config.source_refs()?
    } else {
        args.sources
            .iter()
            .map(|raw| SourceRef::parse(raw))
            .collect::<std::result::Result<Vec<_>, _>>()?
    };

    if sources.is_empty() {
        bail!(
            "No sources given.\n\n💡 Hint: Pass --source owner/repo or list 'sources' in {}",
            config::CONFIG_FILENAME
        );
    }
    Ok(sources)
}

fn resolve_min_confidence(args: &Args, config: &ConfigFile) -> Result<f64> {
    let value = args
        .min_confidence
        .or(config.min_confidence)
        .unwrap_or(DEFAULT_MIN_CONFIDENCE);
    if !(0.0..=1.0).contains(&value) {
        bail!(
            "Invalid --min-confidence {}: must be between 0.0 and 1.0.\n\n💡 Hint: Scores are similarities in the range [0, 1].",
            value
        );
    }
    Ok(value)
}

/// Writes the snapshot export to `--output`, or a summary to stdout
fn present(args: &Args, response: &IngestResponse) -> Result<()> {
    match &args.output {
        Some(path) => {
            let json = serde_json::to_string_pretty(&response.export())?;
            FileSystemWriter::new(PathBuf::from(path)).present(&json)
        }
        None => StdoutPresenter::new().present(&format!("{}\n", response.summary())),
    }
}

fn run_queries(args: &Args, response: &IngestResponse) -> Result<()> {
    let presenter = StdoutPresenter::new();

    if let Some(license) = &args.license {
        let elements = GraphQueries::packages_with_license(&response.snapshot, license);
        presenter.present(&render_elements(
            &format!("Elements licensed under {}", license),
            &elements,
        ))?;
    }

    if let Some(key) = &args.dependents {
        let elements = GraphQueries::dependents_of(&response.snapshot, key);
        presenter.present(&render_elements(&format!("Dependents of {}", key), &elements))?;
    }

    Ok(())
}

fn render_elements(title: &str, elements: &[ElementView]) -> String {
    let mut out = format!("\n{} ({}):\n", title, elements.len());
    for element in elements {
        let label = match (&element.name, &element.version) {
            (Some(name), Some(version)) => format!("{}@{}", name, version),
            (Some(name), None) => name.clone(),
            _ => String::from("-"),
        };
        out.push_str(&format!("  {}  {}\n", label, element.key));
    }
    out
}
