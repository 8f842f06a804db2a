use crate::ingestion::domain::{GraphSnapshot, Statement};
use crate::ingestion::registry::SchemaRegistry;
use crate::shared::error::IngestError;

/// GraphStore port applying one transaction to a snapshot
pub trait GraphStore {
    /// Merges `statements` into `snapshot` as a single transaction
    ///
    /// # Returns
    /// A new snapshot; `snapshot` itself is never modified
    ///
    /// # Errors
    /// Returns [`IngestError::MergeConflict`] carrying the offending
    /// statements on a type, cardinality or identity violation.
    fn merge(
        &self,
        snapshot: &GraphSnapshot,
        statements: &[Statement],
        registry: &SchemaRegistry,
    ) -> Result<GraphSnapshot, IngestError>;
}
