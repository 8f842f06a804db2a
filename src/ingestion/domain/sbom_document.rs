use crate::shared::error::IngestError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Maximum length of an owner or repository name (GitHub limits both to 100)
const MAX_SOURCE_COMPONENT_LENGTH: usize = 100;

/// Identifies a document inside a pipeline run (usually `owner/repo`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An (owner, repository) pair naming where an SBOM is acquired from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef {
    owner: String,
    repo: String,
}

impl SourceRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Result<Self, IngestError> {
        let owner = owner.into();
        let repo = repo.into();
        let display = format!("{}/{}", owner, repo);

        for (component, label) in [(&owner, "owner"), (&repo, "repository")] {
            Self::validate_component(component, label).map_err(|reason| {
                IngestError::InvalidSource {
                    source_ref: display.clone(),
                    reason,
                }
            })?;
        }

        Ok(Self { owner, repo })
    }

    /// Parses the `owner/repo` shorthand used on the command line.
    pub fn parse(raw: &str) -> Result<Self, IngestError> {
        match raw.trim().split_once('/') {
            Some((owner, repo)) => Self::new(owner, repo),
            None => Err(IngestError::InvalidSource {
                source_ref: raw.to_string(),
                reason: "Expected the form owner/repo".to_string(),
            }),
        }
    }

    fn validate_component(component: &str, label: &str) -> std::result::Result<(), String> {
        if component.is_empty() {
            return Err(format!("The {} must not be empty", label));
        }
        if component.len() > MAX_SOURCE_COMPONENT_LENGTH {
            return Err(format!(
                "The {} is too long ({} bytes). Maximum allowed: {} bytes",
                label,
                component.len(),
                MAX_SOURCE_COMPONENT_LENGTH
            ));
        }
        if component == "." || component == ".." {
            return Err(format!("The {} must not be '.' or '..'", label));
        }
        // Security: the components end up in URLs and file paths
        if !component
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(format!(
                "The {} contains invalid characters. Only ASCII alphanumerics, hyphens, underscores and dots are allowed.",
                label
            ));
        }
        Ok(())
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn document_id(&self) -> DocumentId {
        DocumentId::new(self.to_string())
    }
}

impl std::fmt::Display for SourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A parsed SBOM document: a tree of mappings, sequences and scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct SbomDocument {
    id: DocumentId,
    body: JsonValue,
}

impl SbomDocument {
    pub fn new(id: DocumentId, body: JsonValue) -> Self {
        Self { id, body }
    }

    /// Parses raw bytes as JSON. Anything that is not a JSON object is a
    /// format error for this document only.
    pub fn from_bytes(id: DocumentId, bytes: &[u8]) -> Result<Self, IngestError> {
        let body: JsonValue = serde_json::from_slice(bytes)
            .map_err(|e| IngestError::format(format!("{}: invalid JSON: {}", id, e)))?;

        if !body.is_object() {
            return Err(IngestError::format(format!(
                "{}: top-level value must be a JSON object",
                id
            )));
        }

        Ok(Self { id, body })
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn body(&self) -> &JsonValue {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut JsonValue {
        &mut self.body
    }

    pub fn into_body(self) -> JsonValue {
        self.body
    }
}
