use serde::Serialize;

/// RunMetadata value object describing one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    run_id: String,
    started_at: String,
    tool_name: String,
    tool_version: String,
}

impl RunMetadata {
    pub fn new(run_id: String, started_at: String, tool_name: String, tool_version: String) -> Self {
        Self {
            run_id,
            started_at,
            tool_name,
            tool_version,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn started_at(&self) -> &str {
        &self.started_at
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }
}
