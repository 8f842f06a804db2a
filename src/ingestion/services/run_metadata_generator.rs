use crate::ingestion::domain::RunMetadata;
use chrono::Utc;
use uuid::Uuid;

/// RunMetadataGenerator service stamping each pipeline run
pub struct RunMetadataGenerator;

impl RunMetadataGenerator {
    /// Generates run metadata with the current timestamp and a fresh run id
    pub fn generate(tool_name: &str, tool_version: &str) -> RunMetadata {
        let started_at = Utc::now().to_rfc3339();
        let run_id = format!("urn:uuid:{}", Uuid::new_v4());

        RunMetadata::new(
            run_id,
            started_at,
            tool_name.to_string(),
            tool_version.to_string(),
        )
    }

    /// Generates run metadata naming this crate and its compile-time version
    pub fn generate_default() -> RunMetadata {
        Self::generate(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}
