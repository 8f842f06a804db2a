/// Network adapters for external API calls
mod caching_sbom_source;
mod github_sbom_client;

pub use caching_sbom_source::CachingSbomSource;
pub use github_sbom_client::GitHubSbomClient;
