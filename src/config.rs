//! Configuration file support for sbom-ingest.
//!
//! Provides YAML-based configuration through `sbom-ingest.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use sbom_ingest::ingestion::domain::SourceRef;
use sbom_ingest::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "sbom-ingest.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub sources: Option<Vec<SourceEntry>>,
    pub corpus: Option<PathBuf>,
    pub ontology: Option<PathBuf>,
    pub documents_dir: Option<PathBuf>,
    pub license_fields: Option<Vec<String>>,
    pub dampening_weight: Option<f64>,
    pub min_confidence: Option<f64>,
    pub max_concurrent_fetches: Option<usize>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// A repository to ingest.
#[derive(Debug, Deserialize)]
pub struct SourceEntry {
    pub owner: String,
    pub repo: String,
}

impl ConfigFile {
    /// The configured sources as validated references.
    pub fn source_refs(&self) -> Result<Vec<SourceRef>> {
        let mut refs = Vec::new();
        for entry in self.sources.iter().flatten() {
            refs.push(SourceRef::new(entry.owner.clone(), entry.repo.clone())?);
        }
        Ok(refs)
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    for (i, entry) in config.sources.iter().flatten().enumerate() {
        if entry.owner.trim().is_empty() || entry.repo.trim().is_empty() {
            bail!(
                "Invalid config: sources[{}] must have a non-empty owner and repo.\n\n\
                 💡 Hint: Each source is written as {{ owner: acme, repo: widgets }}.",
                i
            );
        }
    }

    for (name, value) in [
        ("dampening_weight", config.dampening_weight),
        ("min_confidence", config.min_confidence),
    ] {
        if let Some(value) = value {
            if !(0.0..=1.0).contains(&value) {
                bail!(
                    "Invalid config: {} must be between 0.0 and 1.0, got {}.\n\n\
                     💡 Hint: Scores are similarities in the range [0, 1].",
                    name,
                    value
                );
            }
        }
    }

    if config.max_concurrent_fetches == Some(0) {
        bail!(
            "Invalid config: max_concurrent_fetches must be at least 1.\n\n\
             💡 Hint: Use 1 to fetch documents one at a time."
        );
    }

    if let Some(fields) = &config.license_fields {
        if fields.is_empty() || fields.iter().any(|f| f.trim().is_empty()) {
            bail!(
                "Invalid config: license_fields must list at least one non-empty field name.\n\n\
                 💡 Hint: The default is [licenseConcluded]."
            );
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
