pub mod graph_snapshot;
pub mod license_corpus;
pub mod run_metadata;
pub mod sbom_document;
pub mod schema;
pub mod statement;

pub use graph_snapshot::{EntityId, GraphSnapshot, StoredValue};
pub(crate) use graph_snapshot::SnapshotBuilder;
pub use license_corpus::{LicenseCorpus, LicenseId};
pub use run_metadata::RunMetadata;
pub use sbom_document::{DocumentId, SbomDocument, SourceRef};
pub use schema::{
    predicates, spdx_ontology, AttributeSchema, Cardinality, SchemaEntry, Uniqueness, ValueType,
};
pub use statement::{EntityRef, Predicate, Statement, Value};
