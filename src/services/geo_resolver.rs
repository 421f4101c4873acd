//! Trait for mapping country codes onto continents.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::error::Result;

/// Continent recorded when a destination country is missing or unresolvable.
pub const UNKNOWN_CONTINENT: &str = "Unknown";

/// Abstraction over a country lookup service (e.g. REST Countries).
///
/// Implementations return [`UNKNOWN_CONTINENT`] for codes they cannot place
/// and reserve `Err` for the service being unreachable.
#[async_trait::async_trait]
pub trait GeoResolver {
    async fn resolve_continent(&self, country_code: &str) -> Result<String>;
}

/// A [`GeoResolver`] wrapper that looks each country code up at most once.
pub struct CachingResolver<R> {
    inner: R,
    cache: Mutex<HashMap<String, String>>,
}

impl<R> CachingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of distinct codes resolved so far.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    fn cached(&self, code: &str) -> Option<String> {
        self.cache.lock().ok()?.get(code).cloned()
    }
}

#[async_trait::async_trait]
impl<R: GeoResolver + Send + Sync> GeoResolver for CachingResolver<R> {
    async fn resolve_continent(&self, country_code: &str) -> Result<String> {
        if let Some(continent) = self.cached(country_code) {
            debug!(country_code, %continent, "Continent cache hit");
            return Ok(continent);
        }

        let continent = self.inner.resolve_continent(country_code).await?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(country_code.to_string(), continent.clone());
        }
        Ok(continent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingResolver {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl GeoResolver for CountingResolver {
        async fn resolve_continent(&self, country_code: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(match country_code {
                "ETH" | "KEN" => "Africa".to_string(),
                _ => UNKNOWN_CONTINENT.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_caching_resolver_hits_inner_once_per_code() {
        let resolver = CachingResolver::new(CountingResolver {
            calls: AtomicUsize::new(0),
        });

        assert_eq!(resolver.resolve_continent("ETH").await.unwrap(), "Africa");
        assert_eq!(resolver.resolve_continent("ETH").await.unwrap(), "Africa");
        assert_eq!(resolver.resolve_continent("XXX").await.unwrap(), "Unknown");
        assert_eq!(resolver.resolve_continent("XXX").await.unwrap(), "Unknown");

        assert_eq!(resolver.inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(resolver.cached_len(), 2);
    }
}
