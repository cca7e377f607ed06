//! Infrastructure layer - upstream integrations

pub mod market;

pub use market::{DexScreenerClient, HistoryFetcher, QuoteCache};
