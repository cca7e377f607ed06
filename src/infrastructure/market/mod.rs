//! Market data acquisition - upstream API client, caching, history

pub mod cache;
pub mod dexscreener;
pub mod history;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::address::{classify, Chain};
use crate::domain::quote::{select_canonical, CanonicalQuote, TradingPair};
use crate::shared::errors::FetchError;

pub use cache::QuoteCache;
pub use dexscreener::DexScreenerClient;
pub use history::HistoryFetcher;

/// One historical price observation for a pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Narrow seam over the upstream market-data aggregator
///
/// Both endpoints are untrusted: slow, flaky, and free to return malformed
/// records. Implementations map transport and decode failures into the
/// `FetchError` taxonomy and never invent field values.
#[async_trait]
pub trait MarketDataApi: Send + Sync {
    /// All trading-pair candidates known upstream for a token address
    async fn token_pairs(&self, address: &str) -> Result<Vec<TradingPair>, FetchError>;

    /// Recent price history for a pair, in whatever order upstream keeps it
    async fn pair_history(
        &self,
        chain: Chain,
        pair_address: &str,
    ) -> Result<Vec<PricePoint>, FetchError>;
}

/// Fetch and normalize one canonical quote for a token address
///
/// Classification happens before any network traffic, so an invalid address
/// fails immediately with no upstream call.
pub async fn fetch_quote(
    api: &dyn MarketDataApi,
    address: &str,
) -> Result<CanonicalQuote, FetchError> {
    let chain =
        classify(address).ok_or_else(|| FetchError::InvalidAddress(address.to_string()))?;
    let candidates = api.token_pairs(address).await?;
    select_canonical(chain, &candidates, Utc::now())
}
