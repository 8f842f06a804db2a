use crate::ingestion::domain::{DocumentId, GraphSnapshot, RunMetadata, Statement};
use crate::ingestion::services::LicenseRewrite;
use crate::shared::error::{DocumentFailure, ExitCode};
use serde::Serialize;

/// IngestResponse - Internal response DTO from the ingestion use case
///
/// Holds the final snapshot together with everything a presenter needs to
/// explain how it was reached.
#[derive(Debug)]
pub struct IngestResponse {
    /// Last successfully merged snapshot
    pub snapshot: GraphSnapshot,
    /// Documents merged, in merge order
    pub merged: Vec<DocumentId>,
    /// Documents rejected during acquisition, conversion or merge
    pub failures: Vec<DocumentFailure>,
    /// License values replaced during normalization
    pub rewrites: Vec<LicenseRewrite>,
    pub metadata: RunMetadata,
    /// True when the run stopped at the first failure
    pub aborted: bool,
}

impl IngestResponse {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Exit code for CI integration.
    pub fn exit_code(&self) -> ExitCode {
        if self.aborted {
            ExitCode::ApplicationError
        } else if self.has_failures() {
            ExitCode::DocumentsFailed
        } else {
            ExitCode::Success
        }
    }

    /// Serializable view written by `--output`.
    pub fn export(&self) -> IngestExport<'_> {
        IngestExport {
            metadata: &self.metadata,
            merged: &self.merged,
            failures: self
                .failures
                .iter()
                .map(|failure| FailureExport {
                    document: &failure.document,
                    error: failure.error.to_string(),
                    offending_statements: failure.error.offending_statements(),
                })
                .collect(),
            rewrites: &self.rewrites,
            aborted: self.aborted,
            graph: &self.snapshot,
        }
    }

    /// Human-readable run summary.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Run {} ({})", self.metadata.run_id(), self.metadata.started_at()),
            format!(
                "Documents merged: {}, failed: {}",
                self.merged.len(),
                self.failures.len()
            ),
            format!(
                "Graph: {} entities, {} facts (tx {})",
                self.snapshot.entity_count(),
                self.snapshot.fact_count(),
                self.snapshot.tx()
            ),
            format!("License rewrites: {}", self.rewrites.len()),
        ];

        for failure in &self.failures {
            lines.push(format!("  ✗ {}", failure.document));
        }
        if self.aborted {
            lines.push("Run aborted after the first failure".to_string());
        }

        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct FailureExport<'a> {
    pub document: &'a DocumentId,
    pub error: String,
    /// Filled for merge conflicts
    pub offending_statements: &'a [Statement],
}

#[derive(Debug, Serialize)]
pub struct IngestExport<'a> {
    pub metadata: &'a RunMetadata,
    pub merged: &'a [DocumentId],
    pub failures: Vec<FailureExport<'a>>,
    pub rewrites: &'a [LicenseRewrite],
    pub aborted: bool,
    pub graph: &'a GraphSnapshot,
}
