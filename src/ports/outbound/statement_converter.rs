use crate::ingestion::domain::{SbomDocument, Statement};
use crate::ingestion::registry::SchemaRegistry;
use crate::shared::error::IngestError;

/// StatementConverter port turning a normalized document into graph statements
pub trait StatementConverter {
    /// Converts `document` into an ordered sequence of statements
    ///
    /// The registry decides how many values a predicate takes and which type
    /// they are coerced to.
    ///
    /// # Errors
    /// Returns [`IngestError::ConversionFormat`] when the document cannot be
    /// read as statements. The error only concerns this document.
    fn convert(
        &self,
        document: &SbomDocument,
        registry: &SchemaRegistry,
    ) -> Result<Vec<Statement>, IngestError>;
}
