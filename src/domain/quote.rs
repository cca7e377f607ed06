//! Canonical quote selection from upstream trading-pair candidates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::address::Chain;
use crate::shared::errors::FetchError;

/// One trading-pair candidate as reported by the upstream aggregator
///
/// Numeric fields arrive as decimal strings and may be absent; a candidate
/// with an unusable price is dropped entirely rather than defaulted, so a
/// malformed record can never win the liquidity comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingPair {
    pub chain_id: String,
    pub pair_address: String,
    pub base_symbol: String,
    pub quote_symbol: String,
    pub price_usd: Option<String>,
    pub volume_usd: Option<String>,
    pub change_24h: Option<f64>,
}

impl TradingPair {
    /// Price parsed as a finite, non-negative number, or `None` if unusable
    fn usable_price(&self) -> Option<f64> {
        let price: f64 = self.price_usd.as_deref()?.parse().ok()?;
        if price.is_finite() && price >= 0.0 {
            Some(price)
        } else {
            None
        }
    }

    /// Reported volume for liquidity ranking; missing or unparseable is 0
    fn liquidity(&self) -> f64 {
        self.volume_usd
            .as_deref()
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

/// The single pair selected as authoritative for display and alerting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalQuote {
    pub price: f64,
    pub pair_address: String,
    pub base_symbol: String,
    pub quote_symbol: String,
    pub change_24h: f64,
    pub chain: Chain,
    pub observed_at: DateTime<Utc>,
}

impl CanonicalQuote {
    pub fn pair_label(&self) -> String {
        format!("{}/{}", self.base_symbol, self.quote_symbol)
    }
}

/// Select the most liquid pair on the classified chain
///
/// Candidates on another chain or without a usable price are excluded, then
/// the highest-volume survivor wins. Ties keep the earliest candidate in
/// upstream order. This rule is what keeps a cross-listed address from
/// locking onto a stale, illiquid, or wrong-chain pair.
pub fn select_canonical(
    chain: Chain,
    candidates: &[TradingPair],
    observed_at: DateTime<Utc>,
) -> Result<CanonicalQuote, FetchError> {
    if candidates.is_empty() {
        return Err(FetchError::NoLiquidity);
    }

    let mut best: Option<(&TradingPair, f64, f64)> = None;
    for pair in candidates {
        if pair.chain_id != chain.id() {
            continue;
        }
        let Some(price) = pair.usable_price() else {
            continue;
        };
        let volume = pair.liquidity();
        // Strictly-greater keeps upstream order on ties
        match best {
            Some((_, _, best_volume)) if volume <= best_volume => {}
            _ => best = Some((pair, price, volume)),
        }
    }

    let (pair, price, _) = best.ok_or(FetchError::NoMatchingPair)?;
    Ok(CanonicalQuote {
        price,
        pair_address: pair.pair_address.clone(),
        base_symbol: pair.base_symbol.clone(),
        quote_symbol: pair.quote_symbol.clone(),
        change_24h: pair.change_24h.unwrap_or(0.0),
        chain,
        observed_at,
    })
}
