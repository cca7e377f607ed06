//! Console implementations of the rendering and notification capabilities

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use crate::domain::quote::CanonicalQuote;
use crate::infrastructure::market::PricePoint;
use crate::shared::errors::FetchError;
use crate::shared::utils::{format_change, format_price};

use super::tracker::{Notifier, Renderer};

/// Prints quotes and errors as operator-facing terminal output
#[derive(Default)]
pub struct ConsoleRenderer {
    banner_printed: AtomicBool,
}

impl Renderer for ConsoleRenderer {
    fn render_quote(&self, quote: &CanonicalQuote, history: &[PricePoint]) {
        if !self.banner_printed.swap(true, Ordering::SeqCst) {
            println!("✅ Tracking {} on {}", quote.base_symbol, quote.chain);
        }

        println!(
            "📈 {} {} | {} | pair {} | updated {}",
            quote.pair_label(),
            format_price(quote.price),
            format_change(quote.change_24h),
            quote.pair_address,
            quote.observed_at.format("%H:%M:%S")
        );

        if let (Some(first), Some(last)) = (history.first(), history.last()) {
            println!(
                "🕰️  {} points | {} -> {}",
                history.len(),
                format_price(first.price),
                format_price(last.price)
            );
        } else {
            println!("🕰️  No history available");
        }
    }

    fn render_error(&self, error: &FetchError) {
        if error.is_retryable() {
            println!("🚨 Failed to fetch data: {} - retrying next tick", error);
        } else {
            println!("⚠️  {} - enter a valid Ethereum (0x...) or Solana (Base58) address", error);
        }
    }
}

/// Terminal-bell notifier: the audio capability degraded to a BEL byte
#[derive(Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        // BEL rings the terminal where supported; the line stands alone otherwise
        println!("\x07🔔 ALERT: {}", message);
        warn!("Price alert fired: {}", message);
    }
}
