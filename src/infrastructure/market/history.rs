//! Bounded historical price fetch with the same TTL wrapper as quotes

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::Duration;

use crate::domain::address::Chain;
use crate::shared::errors::FetchError;

use super::cache::CacheEntry;
use super::{MarketDataApi, PricePoint};

/// Fetches a bounded, ascending window of price history per pair
///
/// Failures here are non-fatal to callers: the tracker renders "no history"
/// and moves on, it never aborts a tick over a missing chart.
pub struct HistoryFetcher {
    api: Arc<dyn MarketDataApi>,
    limit: usize,
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<Vec<PricePoint>>>>,
}

impl HistoryFetcher {
    pub fn new(api: Arc<dyn MarketDataApi>, limit: usize, ttl: Duration) -> Self {
        Self {
            api,
            limit,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Most recent `limit` points for a pair, oldest first
    pub async fn fetch(
        &self,
        chain: Chain,
        pair_address: &str,
    ) -> Result<Vec<PricePoint>, FetchError> {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(pair_address) {
                if entry.is_fresh() {
                    return Ok(entry.value().clone());
                }
            }
        }

        let mut points = self.api.pair_history(chain, pair_address).await?;
        points.sort_by_key(|p| p.timestamp);
        if points.len() > self.limit {
            points.drain(..points.len() - self.limit);
        }

        let mut entries = self.entries.write().await;
        entries.insert(
            pair_address.to_string(),
            CacheEntry::new(points.clone(), self.ttl),
        );
        Ok(points)
    }
}
