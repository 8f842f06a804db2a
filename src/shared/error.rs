use crate::ingestion::domain::{DocumentId, Statement};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish a clean ingestion from a run
/// where some documents were rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every document was merged
    Success = 0,
    /// The run completed but one or more documents failed to merge
    DocumentsFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (corpus load, registry conflict, aborted run, I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::DocumentsFailed => write!(f, "Documents Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Transport-level classification of an acquisition failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionErrorKind {
    /// Connection, timeout or unexpected HTTP status
    Network,
    /// Missing or insufficient credentials (HTTP 401/403)
    Auth,
}

impl fmt::Display for AcquisitionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquisitionErrorKind::Network => write!(f, "network"),
            AcquisitionErrorKind::Auth => write!(f, "auth"),
        }
    }
}

/// Application-specific errors for SBOM ingestion.
///
/// Per-document kinds (`Acquisition`, `ConversionFormat`, `MergeConflict`) are
/// isolated by the loader; the others abort the run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Schema registry conflict on predicate '{predicate}': {field} is already {existing}, refusing to install {requested}\n\n💡 Hint: Check the ontology for duplicate or contradictory entries")]
    RegistryConflict {
        predicate: String,
        field: &'static str,
        existing: String,
        requested: String,
    },

    #[error("Malformed SBOM document: {details}")]
    ConversionFormat { details: String },

    #[error("Merge conflict: {reason}\nOffending statements:\n{}", list_statements(.statements))]
    MergeConflict {
        reason: String,
        statements: Vec<Statement>,
    },

    #[error("Failed to fetch SBOM for {source_ref} ({kind} error)\nDetails: {details}")]
    Acquisition {
        source_ref: String,
        kind: AcquisitionErrorKind,
        details: String,
    },

    #[error("Failed to load license corpus: {path}\nDetails: {details}\n\n💡 Hint: Provide an SPDX license-list JSON file or a JSON array of identifiers")]
    CorpusLoad { path: PathBuf, details: String },

    #[error("Failed to load ontology: {path}\nDetails: {details}\n\n💡 Hint: The ontology must be a YAML list of entries with an 'ident' field")]
    OntologyLoad { path: PathBuf, details: String },

    #[error("Invalid SBOM source: {source_ref}\nReason: {reason}\n\n💡 Hint: Sources are written as owner/repo")]
    InvalidSource { source_ref: String, reason: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileRead { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for value objects and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl IngestError {
    pub fn format(details: impl Into<String>) -> Self {
        IngestError::ConversionFormat {
            details: details.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>, statements: Vec<Statement>) -> Self {
        IngestError::MergeConflict {
            reason: reason.into(),
            statements,
        }
    }

    /// Statements that caused a merge conflict; empty for other kinds.
    pub fn offending_statements(&self) -> &[Statement] {
        match self {
            IngestError::MergeConflict { statements, .. } => statements,
            _ => &[],
        }
    }

    /// True for errors that only invalidate a single document.
    pub fn is_per_document(&self) -> bool {
        matches!(
            self,
            IngestError::Acquisition { .. }
                | IngestError::ConversionFormat { .. }
                | IngestError::MergeConflict { .. }
        )
    }
}

fn list_statements(statements: &[Statement]) -> String {
    statements
        .iter()
        .map(|statement| format!("  {}", statement))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A document that could not be merged, with the error that rejected it.
#[derive(Debug, Error)]
#[error("Document '{document}' was not merged: {error}")]
pub struct DocumentFailure {
    pub document: DocumentId,
    #[source]
    pub error: IngestError,
}

impl DocumentFailure {
    pub fn new(document: DocumentId, error: IngestError) -> Self {
        Self { document, error }
    }
}
