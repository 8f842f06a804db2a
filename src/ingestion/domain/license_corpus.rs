use crate::shared::error::IngestError;
use std::collections::BTreeSet;

/// Maximum length for a canonical license identifier
const MAX_LICENSE_ID_LENGTH: usize = 128;

/// NewType wrapper for a canonical license identifier (e.g. `Apache-2.0`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LicenseId(String);

impl LicenseId {
    pub fn new(id: impl Into<String>) -> Result<Self, IngestError> {
        let id = id.into();
        let trimmed = id.trim();

        if trimmed.is_empty() {
            return Err(IngestError::Validation {
                message: "License identifier cannot be empty".to_string(),
            });
        }

        if trimmed.len() > MAX_LICENSE_ID_LENGTH {
            return Err(IngestError::Validation {
                message: format!(
                    "License identifier is too long ({} bytes). Maximum allowed: {} bytes",
                    trimmed.len(),
                    MAX_LICENSE_ID_LENGTH
                ),
            });
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(IngestError::Validation {
                message: format!("License identifier '{}' contains whitespace", trimmed),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for LicenseId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LicenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed vocabulary of canonical license identifiers.
///
/// Members iterate in lexicographic order, so "first encountered" during a
/// scan is always the smallest identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LicenseCorpus {
    ids: BTreeSet<LicenseId>,
}

impl LicenseCorpus {
    /// Builds a corpus, rejecting duplicates and invalid identifiers.
    pub fn new<I, S>(ids: I) -> Result<Self, IngestError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for raw in ids {
            let id = LicenseId::new(raw)?;
            if !set.insert(id.clone()) {
                return Err(IngestError::Validation {
                    message: format!("Duplicate license identifier in corpus: {}", id),
                });
            }
        }
        Ok(Self { ids: set })
    }

    pub fn contains(&self, expression: &str) -> bool {
        self.ids.contains(expression)
    }

    pub fn get(&self, expression: &str) -> Option<&LicenseId> {
        self.ids.get(expression)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LicenseId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
