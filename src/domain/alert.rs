//! Price alert state machine

use chrono::{DateTime, Utc};

use crate::domain::quote::CanonicalQuote;
use crate::shared::types::AlertThresholds;

/// Alert lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    Idle,
    Armed,
    Triggered,
}

/// Which side of the band was breached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertDirection {
    Above,
    Below,
}

/// User-supplied alert configuration, immutable for one armed cycle
#[derive(Debug, Clone)]
pub struct AlertConfig {
    pub thresholds: AlertThresholds,
    pub token_label: String,
}

/// A single firing of an armed alert
#[derive(Debug, Clone)]
pub struct AlertTrigger {
    pub direction: AlertDirection,
    pub threshold: f64,
    pub quote: CanonicalQuote,
    pub token_label: String,
    pub triggered_at: DateTime<Utc>,
}

impl AlertTrigger {
    pub fn message(&self) -> String {
        match self.direction {
            AlertDirection::Above => format!(
                "{} price went ABOVE ${} (now {:.8})",
                self.token_label, self.threshold, self.quote.price
            ),
            AlertDirection::Below => format!(
                "{} price dropped BELOW ${} (now {:.8})",
                self.token_label, self.threshold, self.quote.price
            ),
        }
    }
}

/// Single-shot threshold evaluator
///
/// Lifecycle: `configure` arms from any state, `observe` fires at most once
/// per armed cycle, `clear` returns to idle. Observing while idle or already
/// triggered is a no-op, so a burst of in-band observations after a crossing
/// can never produce a second notification.
#[derive(Debug)]
pub struct AlertEngine {
    state: AlertState,
    config: Option<AlertConfig>,
    last_trigger: Option<AlertTrigger>,
}

impl AlertEngine {
    pub fn new() -> Self {
        Self {
            state: AlertState::Idle,
            config: None,
            last_trigger: None,
        }
    }

    pub fn state(&self) -> AlertState {
        self.state
    }

    pub fn last_trigger(&self) -> Option<&AlertTrigger> {
        self.last_trigger.as_ref()
    }

    /// Arm the alert, replacing any previous configuration
    pub fn configure(&mut self, config: AlertConfig) {
        self.config = Some(config);
        self.last_trigger = None;
        self.state = AlertState::Armed;
    }

    /// Drop back to idle; re-arming requires a fresh `configure`
    pub fn clear(&mut self) {
        self.state = AlertState::Idle;
    }

    /// Evaluate one price observation
    ///
    /// High threshold is checked before low; the first satisfied condition
    /// fires. Thresholds that are absent or non-positive are disabled.
    pub fn observe(&mut self, quote: &CanonicalQuote) -> Option<AlertTrigger> {
        if self.state != AlertState::Armed {
            return None;
        }
        let config = self.config.as_ref()?;

        let breach = match config.thresholds.high.filter(|h| *h > 0.0) {
            Some(high) if quote.price > high => Some((AlertDirection::Above, high)),
            _ => match config.thresholds.low.filter(|l| *l > 0.0) {
                Some(low) if quote.price < low => Some((AlertDirection::Below, low)),
                _ => None,
            },
        };

        let (direction, threshold) = breach?;
        let trigger = AlertTrigger {
            direction,
            threshold,
            quote: quote.clone(),
            token_label: config.token_label.clone(),
            triggered_at: Utc::now(),
        };
        self.state = AlertState::Triggered;
        self.last_trigger = Some(trigger.clone());
        Some(trigger)
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new()
    }
}
