use crate::ingestion::domain::SourceRef;
use crate::ports::outbound::SbomSource;
use crate::shared::error::IngestError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingSbomSource wraps an SbomSource and adds in-memory caching.
///
/// Repeated sources within a run are fetched once. Only successful fetches
/// are cached, so a failed source is tried again the next time it is asked
/// for. The cache is thread-safe for concurrent fetches.
pub struct CachingSbomSource<S: SbomSource> {
    inner: S,
    cache: Arc<DashMap<SourceRef, Arc<Vec<u8>>>>,
}

impl<S: SbomSource> CachingSbomSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Number of cached documents
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<S: SbomSource> SbomSource for CachingSbomSource<S> {
    async fn fetch(&self, source: &SourceRef, token: Option<&str>) -> Result<Vec<u8>, IngestError> {
        if let Some(cached) = self.cache.get(source) {
            return Ok(cached.as_ref().clone());
        }

        let bytes = self.inner.fetch(source, token).await?;
        self.cache.insert(source.clone(), Arc::new(bytes.clone()));

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::AcquisitionErrorKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock source that tracks call counts and fails for the `broken` owner
    struct MockSbomSource {
        call_count: AtomicUsize,
    }

    impl MockSbomSource {
        fn new() -> Self {
            Self {
                call_count: AtomicUsize::new(0),
            }
        }

        fn get_call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SbomSource for MockSbomSource {
        async fn fetch(&self, source: &SourceRef, _token: Option<&str>) -> Result<Vec<u8>, IngestError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if source.owner() == "broken" {
                return Err(IngestError::Acquisition {
                    source_ref: source.to_string(),
                    kind: AcquisitionErrorKind::Network,
                    details: "connection reset".to_string(),
                });
            }
            Ok(format!("{{\"name\": \"{}\"}}", source).into_bytes())
        }
    }

    #[tokio::test]
    async fn test_caching_source_returns_cached_value() {
        let caching = CachingSbomSource::new(MockSbomSource::new());
        let source = SourceRef::parse("acme/widgets").unwrap();

        let first = caching.fetch(&source, None).await.unwrap();
        let second = caching.fetch(&source, None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(caching.inner.get_call_count(), 1);
        assert_eq!(caching.cache_size(), 1);
    }

    #[tokio::test]
    async fn test_caching_source_keys_by_owner_and_repo() {
        let caching = CachingSbomSource::new(MockSbomSource::new());

        caching.fetch(&SourceRef::parse("acme/widgets").unwrap(), None).await.unwrap();
        caching.fetch(&SourceRef::parse("acme/gadgets").unwrap(), None).await.unwrap();

        assert_eq!(caching.inner.get_call_count(), 2);
        assert_eq!(caching.cache_size(), 2);
    }

    #[tokio::test]
    async fn test_caching_source_does_not_cache_failures() {
        let caching = CachingSbomSource::new(MockSbomSource::new());
        let source = SourceRef::parse("broken/widgets").unwrap();

        assert!(caching.fetch(&source, None).await.is_err());
        assert!(caching.fetch(&source, None).await.is_err());

        assert_eq!(caching.inner.get_call_count(), 2);
        assert_eq!(caching.cache_size(), 0);
    }
}
