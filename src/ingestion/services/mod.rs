mod document_normalizer;
mod graph_loader;
mod graph_queries;
mod identifier_normalizer;
mod license_resolver;
mod run_metadata_generator;
mod similarity_scorer;

pub use document_normalizer::{DocumentNormalizer, LicenseRewrite, DEFAULT_LICENSE_FIELD};
pub use graph_loader::{DocumentBatch, LoadDecision, LoadOutcome, TransactionalGraphLoader};
pub use graph_queries::{ElementView, GraphQueries};
pub use identifier_normalizer::IdentifierNormalizer;
pub use license_resolver::{LicenseResolver, Resolution, ResolutionKind};
pub use run_metadata_generator::RunMetadataGenerator;
pub use similarity_scorer::{jaro, jaro_winkler, SimilarityScorer, DEFAULT_DAMPENING_WEIGHT};
