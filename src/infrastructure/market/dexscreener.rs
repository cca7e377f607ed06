//! DexScreener HTTP client

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::domain::address::Chain;
use crate::domain::quote::TradingPair;
use crate::shared::errors::FetchError;
use crate::shared::types::UpstreamConfig;

use super::{MarketDataApi, PricePoint};

/// Token lookup response: the `pairs` field may be null or missing entirely
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    pairs: Option<Vec<PairRecord>>,
}

/// One pair record from the token lookup endpoint
#[derive(Debug, Deserialize)]
struct PairRecord {
    #[serde(rename = "chainId", default)]
    chain_id: Option<String>,
    #[serde(rename = "pairAddress", default)]
    pair_address: Option<String>,
    #[serde(rename = "priceUsd", default)]
    price_usd: Option<String>,
    #[serde(rename = "volumeUsd", default)]
    volume_usd: Option<String>,
    #[serde(rename = "baseToken", default)]
    base_token: Option<TokenRef>,
    #[serde(rename = "quoteToken", default)]
    quote_token: Option<TokenRef>,
    #[serde(rename = "priceChange", default)]
    price_change: Option<PriceChange>,
}

#[derive(Debug, Deserialize)]
struct TokenRef {
    #[serde(default)]
    symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PriceChange {
    #[serde(default)]
    h24: Option<f64>,
}

impl PairRecord {
    /// Convert to a domain candidate; records missing identity fields are
    /// unusable as a whole and dropped
    fn into_pair(self) -> Option<TradingPair> {
        Some(TradingPair {
            chain_id: self.chain_id?,
            pair_address: self.pair_address?,
            base_symbol: self.base_token.and_then(|t| t.symbol)?,
            quote_symbol: self.quote_token.and_then(|t| t.symbol)?,
            price_usd: self.price_usd,
            volume_usd: self.volume_usd,
            change_24h: self.price_change.and_then(|c| c.h24),
        })
    }
}

/// Pair history response
#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    candles: Option<Vec<CandleRecord>>,
}

#[derive(Debug, Deserialize)]
struct CandleRecord {
    /// Epoch milliseconds
    #[serde(default)]
    t: Option<i64>,
    #[serde(rename = "priceUsd", default)]
    price_usd: Option<String>,
}

impl CandleRecord {
    fn into_point(self) -> Option<PricePoint> {
        let timestamp = Utc.timestamp_millis_opt(self.t?).single()?;
        let price: f64 = self.price_usd?.parse().ok()?;
        if !price.is_finite() || price < 0.0 {
            return None;
        }
        Some(PricePoint { timestamp, price })
    }
}

/// HTTP client for the DexScreener aggregator API
pub struct DexScreenerClient {
    client: Client,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(|e| FetchError::UpstreamUnavailable(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UpstreamUnavailable(format!(
                "HTTP {} from {}",
                status, url
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl MarketDataApi for DexScreenerClient {
    async fn token_pairs(&self, address: &str) -> Result<Vec<TradingPair>, FetchError> {
        let url = format!("{}/latest/dex/tokens/{}", self.base_url, address);
        debug!("Fetching token pairs: {}", url);

        let body: TokenResponse = self.get_json(&url).await?;
        let pairs = body
            .pairs
            .unwrap_or_default()
            .into_iter()
            .filter_map(PairRecord::into_pair)
            .collect();
        Ok(pairs)
    }

    async fn pair_history(
        &self,
        chain: Chain,
        pair_address: &str,
    ) -> Result<Vec<PricePoint>, FetchError> {
        let url = format!(
            "{}/latest/dex/candles/{}/{}",
            self.base_url,
            chain.id(),
            pair_address
        );
        debug!("Fetching pair history: {}", url);

        let body: HistoryResponse = self.get_json(&url).await?;
        let points = body
            .candles
            .unwrap_or_default()
            .into_iter()
            .filter_map(CandleRecord::into_point)
            .collect();
        Ok(points)
    }
}
