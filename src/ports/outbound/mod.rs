/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the ingestion core uses
/// to interact with external systems (network, file system, graph store, console).
pub mod corpus_reader;
pub mod graph_store;
pub mod ontology_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod sbom_source;
pub mod statement_converter;

pub use corpus_reader::CorpusReader;
pub use graph_store::GraphStore;
pub use ontology_reader::OntologyReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use sbom_source::SbomSource;
pub use statement_converter::StatementConverter;
