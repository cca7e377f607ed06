//! Common types used across the application

use serde::{Deserialize, Serialize};

/// Default demo token from the upstream docs, handy for a first run.
pub const DEFAULT_ADDRESS: &str = "FasH397CeZLNYWkd3wWK9vrmjd1z93n3b59DssRXpump";

/// Upstream aggregator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub fetch_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dexscreener.com".to_string(),
            fetch_timeout_secs: 10,
        }
    }
}

/// Alert threshold configuration
///
/// A threshold of `None` or `<= 0.0` disables that direction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub high: Option<f64>,
    pub low: Option<f64>,
}

impl AlertThresholds {
    pub fn is_enabled(&self) -> bool {
        self.high.map_or(false, |v| v > 0.0) || self.low.map_or(false, |v| v > 0.0)
    }
}

/// Tracker configuration
///
/// Config files may be partial: omitted fields fall back to these defaults,
/// and CLI flags override both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub address: String,
    pub alert: AlertThresholds,
    pub upstream: UpstreamConfig,
    pub poll_interval_secs: u64,
    pub cache_ttl_secs: u64,
    pub history_limit: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            alert: AlertThresholds::default(),
            upstream: UpstreamConfig::default(),
            poll_interval_secs: 10,
            cache_ttl_secs: 10,
            history_limit: 200,
        }
    }
}
