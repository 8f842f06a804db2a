//! sbom-ingest - SBOM ingestion into a versioned dependency graph
//!
//! This library acquires SPDX documents, corrects free-text license values
//! against a corpus of SPDX identifiers, and merges each document into an
//! immutable graph snapshot as one transaction. It follows a hexagonal
//! architecture.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`ingestion`): Domain types, the schema registry and pure services
//! - **Application Layer** (`application`): The ingestion use case and its DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use sbom_ingest::prelude::*;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! let reader = FileSystemReader::new();
//! let corpus = reader.read_corpus(Path::new("licenses.json"))?;
//!
//! let use_case = IngestSbomsUseCase::new(
//!     LocalSbomSource::new("sboms".into()),
//!     SpdxStatementConverter::new(),
//!     InMemoryGraphStore::new(),
//!     StderrProgressReporter::new(),
//!     Arc::new(SchemaRegistry::new()),
//!     corpus,
//!     DocumentNormalizer::new(LicenseResolver::default()),
//! );
//!
//! let request = IngestRequest::new(vec![SourceRef::parse("acme/widgets")?], spdx_ontology());
//! let response = use_case.execute(request).await?;
//!
//! for element in GraphQueries::packages_with_license(&response.snapshot, "MIT") {
//!     println!("{}", element.key);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ingestion;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::conversion::SpdxStatementConverter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, LocalSbomSource, StdoutPresenter,
    };
    pub use crate::adapters::outbound::graph::InMemoryGraphStore;
    pub use crate::adapters::outbound::network::{CachingSbomSource, GitHubSbomClient};
    pub use crate::application::dto::{IngestRequest, IngestResponse};
    pub use crate::application::use_cases::IngestSbomsUseCase;
    pub use crate::ingestion::domain::{
        spdx_ontology, DocumentId, GraphSnapshot, LicenseCorpus, SbomDocument, SchemaEntry,
        SourceRef, Statement,
    };
    pub use crate::ingestion::registry::{InstallGuard, SchemaRegistry};
    pub use crate::ingestion::services::{
        DocumentNormalizer, GraphQueries, IdentifierNormalizer, LicenseResolver,
        SimilarityScorer, TransactionalGraphLoader,
    };
    pub use crate::ports::outbound::{
        CorpusReader, GraphStore, OntologyReader, OutputPresenter, ProgressReporter, SbomSource,
        StatementConverter,
    };
    pub use crate::shared::error::{DocumentFailure, ExitCode, IngestError};
    pub use crate::shared::Result;
}
