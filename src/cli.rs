use clap::Parser;
use std::path::PathBuf;

/// Ingest SPDX SBOMs into a dependency graph with fuzzy license resolution
#[derive(Parser, Debug)]
#[command(name = "sbom-ingest")]
#[command(version)]
#[command(
    about = "Ingest SPDX SBOMs into a dependency graph with fuzzy license resolution",
    long_about = None
)]
pub struct Args {
    /// Path to a config file (defaults to ./sbom-ingest.config.yml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Repository to ingest, as owner/repo
    /// Can be specified multiple times: -s acme/widgets -s acme/gadgets
    #[arg(short, long = "source", value_name = "OWNER/REPO")]
    pub sources: Vec<String>,

    /// License corpus: an SPDX license-list JSON file or a JSON array of identifiers
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Ontology YAML file (defaults to the built-in SPDX ontology)
    #[arg(long)]
    pub ontology: Option<PathBuf>,

    /// Read SBOMs from <DIR>/<owner>/<repo>.json instead of the GitHub API
    #[arg(long, value_name = "DIR")]
    pub documents_dir: Option<PathBuf>,

    /// GitHub token used for the dependency graph API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Write the final snapshot as JSON to this file (defaults to a summary on stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the elements whose concluded license is this identifier
    #[arg(long, value_name = "LICENSE_ID")]
    pub license: Option<String>,

    /// Print the elements depending on the element with this key (purl)
    #[arg(long, value_name = "ELEMENT_KEY")]
    pub dependents: Option<String>,

    /// Stop at the first document that fails instead of skipping it
    #[arg(long)]
    pub fail_fast: bool,

    /// Report license rewrites scoring below this value
    #[arg(long)]
    pub min_confidence: Option<f64>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
