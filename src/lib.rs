//! MemeSignal - multi-chain meme token price tracker with threshold alerts

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;

// Re-export main types for convenience
pub use application::TrackerService;
pub use domain::address::{classify, Chain};
pub use domain::alert::{AlertEngine, AlertState};
pub use domain::quote::CanonicalQuote;
pub use infrastructure::market::{DexScreenerClient, HistoryFetcher, QuoteCache};
pub use shared::types::TrackerConfig;
