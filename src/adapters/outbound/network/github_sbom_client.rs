use crate::ingestion::domain::SourceRef;
use crate::ports::outbound::SbomSource;
use crate::shared::error::{AcquisitionErrorKind, IngestError};
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

const GITHUB_API_URL: &str = "https://api.github.com";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHubSbomClient adapter for the GitHub dependency graph SBOM export
///
/// This adapter implements the SbomSource port with
/// `GET /repos/{owner}/{repo}/dependency-graph/sbom`, which returns an SPDX
/// document wrapped as `{"sbom": {...}}`.
///
/// # Async Support
/// Uses the async reqwest client so several repositories can be fetched at
/// once.
pub struct GitHubSbomClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl GitHubSbomClient {
    /// Creates a client for the public GitHub API
    pub fn new() -> Result<Self> {
        Self::with_base_url(GITHUB_API_URL)
    }

    /// Creates a client for another API root (GitHub Enterprise, tests)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 3,
        })
    }

    pub fn sbom_url(&self, source: &SourceRef) -> String {
        // SourceRef already restricts owner and repo to URL-safe characters
        format!(
            "{}/repos/{}/{}/dependency-graph/sbom",
            self.base_url,
            urlencoding::encode(source.owner()),
            urlencoding::encode(source.repo())
        )
    }

    /// Auth for rejected credentials, Network for everything else.
    pub fn classify_status(status: StatusCode) -> AcquisitionErrorKind {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AcquisitionErrorKind::Auth,
            _ => AcquisitionErrorKind::Network,
        }
    }

    /// Server errors and rate limiting are worth another attempt; other
    /// statuses give the same answer every time.
    pub fn is_retryable_status(status: StatusCode) -> bool {
        status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
    }

    fn acquisition_error(source: &SourceRef, kind: AcquisitionErrorKind, details: String) -> IngestError {
        IngestError::Acquisition {
            source_ref: source.to_string(),
            kind,
            details,
        }
    }

    /// Fetches with retry on transport failures, 5xx and 429.
    async fn fetch_with_retry(&self, source: &SourceRef, token: Option<&str>) -> std::result::Result<Vec<u8>, IngestError> {
        let mut attempt = 1;
        loop {
            match self.fetch_once(source, token).await {
                Ok(bytes) => return Ok(bytes),
                Err(failure) if failure.retryable && attempt < self.max_retries => {
                    tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    attempt += 1;
                }
                Err(failure) => return Err(failure.error),
            }
        }
    }

    async fn fetch_once(&self, source: &SourceRef, token: Option<&str>) -> std::result::Result<Vec<u8>, FetchFailure> {
        let mut request = self
            .client
            .get(self.sbom_url(source))
            .header(reqwest::header::ACCEPT, GITHUB_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| FetchFailure {
            error: Self::acquisition_error(source, AcquisitionErrorKind::Network, e.to_string()),
            retryable: true,
        })?;

        let status = response.status();
        if !status.is_success() {
            let details = match status {
                StatusCode::NOT_FOUND => format!(
                    "GitHub API returned {} (repository missing, private, or dependency graph disabled)",
                    status
                ),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN if token.is_none() => format!(
                    "GitHub API returned {}; no token was provided (use --token or GITHUB_TOKEN)",
                    status
                ),
                _ => format!("GitHub API returned {}", status),
            };
            return Err(FetchFailure {
                error: Self::acquisition_error(source, Self::classify_status(status), details),
                retryable: Self::is_retryable_status(status),
            });
        }

        let bytes = response.bytes().await.map_err(|e| FetchFailure {
            error: Self::acquisition_error(source, AcquisitionErrorKind::Network, e.to_string()),
            retryable: true,
        })?;
        Ok(bytes.to_vec())
    }
}

/// One failed attempt.
struct FetchFailure {
    error: IngestError,
    retryable: bool,
}

// No Default: client construction can fail and must be handled by the caller.

#[async_trait]
impl SbomSource for GitHubSbomClient {
    async fn fetch(&self, source: &SourceRef, token: Option<&str>) -> std::result::Result<Vec<u8>, IngestError> {
        self.fetch_with_retry(source, token).await
    }
}
