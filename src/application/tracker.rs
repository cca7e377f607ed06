//! Poll loop driving fetch, render, and alert evaluation

use std::sync::Arc;

use tokio::time::{sleep, Duration};
use tracing::{info, warn};

use crate::domain::address::{classify, Chain};
use crate::domain::alert::{AlertConfig, AlertEngine};
use crate::domain::quote::CanonicalQuote;
use crate::infrastructure::market::{HistoryFetcher, MarketDataApi, PricePoint, QuoteCache};
use crate::shared::errors::{AppError, FetchError};
use crate::shared::types::TrackerConfig;
use crate::shared::utils::short_address;

/// External notification capability, invoked at most once per alert trigger
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Per-tick output consumer
pub trait Renderer: Send + Sync {
    fn render_quote(&self, quote: &CanonicalQuote, history: &[PricePoint]);
    fn render_error(&self, error: &FetchError);
}

/// Single-token tracker: one address, one alert, one cooperative loop
///
/// Each tick resolves the cached quote, renders it, and feeds the alert
/// engine; the next sleep only starts after the tick completes, so ticks
/// never overlap. Fetch failures degrade the tick and are retried by the
/// next one; nothing on the fetch path terminates the loop.
pub struct TrackerService {
    config: TrackerConfig,
    chain: Chain,
    cache: QuoteCache,
    history: HistoryFetcher,
    alert: AlertEngine,
    notifier: Arc<dyn Notifier>,
    renderer: Arc<dyn Renderer>,
}

impl TrackerService {
    /// Build a tracker, rejecting an unclassifiable address before any
    /// network traffic
    pub fn new(
        config: TrackerConfig,
        api: Arc<dyn MarketDataApi>,
        notifier: Arc<dyn Notifier>,
        renderer: Arc<dyn Renderer>,
    ) -> Result<Self, AppError> {
        let chain = classify(&config.address)
            .ok_or_else(|| FetchError::InvalidAddress(config.address.clone()))?;

        let cache = QuoteCache::new(api.clone(), Duration::from_secs(config.cache_ttl_secs));
        let history = HistoryFetcher::new(
            api,
            config.history_limit,
            Duration::from_secs(config.cache_ttl_secs),
        );

        let mut alert = AlertEngine::new();
        if config.alert.is_enabled() {
            alert.configure(AlertConfig {
                thresholds: config.alert.clone(),
                token_label: short_address(&config.address),
            });
            info!(
                "Alert armed for {}: high={:?} low={:?}",
                short_address(&config.address),
                config.alert.high,
                config.alert.low
            );
        }

        Ok(Self {
            config,
            chain,
            cache,
            history,
            alert,
            notifier,
            renderer,
        })
    }

    /// Run ticks forever at the configured interval
    pub async fn run(&mut self) -> Result<(), AppError> {
        info!(
            "Tracking {} on {} every {}s",
            short_address(&self.config.address),
            self.chain,
            self.config.poll_interval_secs
        );

        loop {
            self.tick().await;
            sleep(Duration::from_secs(self.config.poll_interval_secs)).await;
        }
    }

    /// One poll cycle: fetch, render, evaluate
    pub async fn tick(&mut self) {
        let quote = match self.cache.get(&self.config.address).await {
            Ok(quote) => quote,
            Err(err) => {
                // A failed tick is never a zero-price observation
                warn!("Tick degraded: {}", err);
                self.renderer.render_error(&err);
                return;
            }
        };

        let history = match self.history.fetch(quote.chain, &quote.pair_address).await {
            Ok(points) => points,
            Err(err) => {
                warn!("History unavailable for {}: {}", quote.pair_address, err);
                Vec::new()
            }
        };

        self.renderer.render_quote(&quote, &history);

        if let Some(trigger) = self.alert.observe(&quote) {
            self.notifier.notify(&trigger.message());
            // Reference behavior: a fired alert is spent until reconfigured
            self.alert.clear();
        }
    }
}
