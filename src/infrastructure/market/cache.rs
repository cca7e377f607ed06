//! Time-bounded memoization for canonical quotes

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use tracing::warn;

use crate::domain::quote::CanonicalQuote;
use crate::shared::errors::FetchError;

use super::{fetch_quote, MarketDataApi};

/// One cached value with its fetch time and lifetime
///
/// Entries expire and get replaced whole; there is no partial update.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    value: T,
    fetched_at: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < self.ttl
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

/// Per-address quote cache bounding upstream request rate
///
/// A fresh entry short-circuits the fetch entirely. On a failed refresh the
/// prior entry keeps serving even past its TTL: stale-but-valid data beats
/// no data, and the next tick retries anyway. Entries for different
/// addresses are independent, so concurrent trackers never contend on state.
pub struct QuoteCache {
    api: Arc<dyn MarketDataApi>,
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<CanonicalQuote>>>,
}

impl QuoteCache {
    pub fn new(api: Arc<dyn MarketDataApi>, ttl: Duration) -> Self {
        Self {
            api,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve the canonical quote for an address, hitting upstream only
    /// when no fresh entry exists
    pub async fn get(&self, address: &str) -> Result<CanonicalQuote, FetchError> {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(address) {
                if entry.is_fresh() {
                    return Ok(entry.value().clone());
                }
            }
        }

        match fetch_quote(self.api.as_ref(), address).await {
            Ok(quote) => {
                let mut entries = self.entries.write().await;
                entries.insert(address.to_string(), CacheEntry::new(quote.clone(), self.ttl));
                Ok(quote)
            }
            Err(err) => {
                let entries = self.entries.read().await;
                if let Some(entry) = entries.get(address) {
                    warn!("Refresh failed for {}, serving stale quote: {}", address, err);
                    return Ok(entry.value().clone());
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::address::Chain;
    use crate::domain::quote::TradingPair;
    use crate::infrastructure::market::PricePoint;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    const SOL_ADDRESS: &str = "FasH397CeZLNYWkd3wWK9vrmjd1z93n3b59DssRXpump";

    /// Mock upstream that counts calls and can be switched to fail
    struct CountingApi {
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    impl CountingApi {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failing: AtomicBool::new(false),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl MarketDataApi for CountingApi {
        async fn token_pairs(&self, _address: &str) -> Result<Vec<TradingPair>, FetchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(FetchError::UpstreamUnavailable("HTTP 500".to_string()));
            }
            Ok(vec![TradingPair {
                chain_id: "solana".to_string(),
                pair_address: "pair".to_string(),
                base_symbol: "MEME".to_string(),
                quote_symbol: "SOL".to_string(),
                // Price changes per call so hits are distinguishable
                price_usd: Some(format!("{}", 1.0 + call as f64)),
                volume_usd: Some("100".to_string()),
                change_24h: None,
            }])
        }

        async fn pair_history(
            &self,
            _chain: Chain,
            _pair_address: &str,
        ) -> Result<Vec<PricePoint>, FetchError> {
            Ok(vec![])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_within_ttl_skips_upstream() {
        let api = Arc::new(CountingApi::new());
        let cache = QuoteCache::new(api.clone(), Duration::from_secs(10));

        let first = cache.get(SOL_ADDRESS).await.unwrap();
        tokio::time::advance(Duration::from_secs(5)).await;
        let second = cache.get(SOL_ADDRESS).await.unwrap();

        assert_eq!(api.calls(), 1);
        assert_eq!(first.price, second.price);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_refetches() {
        let api = Arc::new(CountingApi::new());
        let cache = QuoteCache::new(api.clone(), Duration::from_secs(10));

        let first = cache.get(SOL_ADDRESS).await.unwrap();
        tokio::time::advance(Duration::from_secs(11)).await;
        let second = cache.get(SOL_ADDRESS).await.unwrap();

        assert_eq!(api.calls(), 2);
        assert_ne!(first.price, second.price);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_serves_stale_value() {
        let api = Arc::new(CountingApi::new());
        let cache = QuoteCache::new(api.clone(), Duration::from_secs(10));

        let first = cache.get(SOL_ADDRESS).await.unwrap();
        tokio::time::advance(Duration::from_secs(11)).await;
        api.set_failing(true);

        let stale = cache.get(SOL_ADDRESS).await.unwrap();
        assert_eq!(stale.price, first.price);
        assert_eq!(api.calls(), 2);

        // Recovery replaces the stale entry
        api.set_failing(false);
        let fresh = cache.get(SOL_ADDRESS).await.unwrap();
        assert_ne!(fresh.price, first.price);
    }

    #[tokio::test]
    async fn test_failure_without_prior_entry_propagates() {
        let api = Arc::new(CountingApi::new());
        api.set_failing(true);
        let cache = QuoteCache::new(api.clone(), Duration::from_secs(10));

        let err = cache.get(SOL_ADDRESS).await.unwrap_err();
        assert!(matches!(err, FetchError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_invalid_address_never_hits_upstream() {
        let api = Arc::new(CountingApi::new());
        let cache = QuoteCache::new(api.clone(), Duration::from_secs(10));

        let err = cache.get("not an address").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidAddress(_)));
        assert_eq!(api.calls(), 0);
    }
}
