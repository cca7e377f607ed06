//! Address format classification for supported chains

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical Solana public key length in bytes
const SOLANA_PUBKEY_LEN: usize = 32;

/// Supported blockchain networks, derived from address shape alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Ethereum,
    Solana,
}

impl Chain {
    /// Chain identifier as reported by the upstream aggregator's `chainId` field
    pub fn id(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Solana => "solana",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chain::Ethereum => write!(f, "Ethereum"),
            Chain::Solana => write!(f, "Solana"),
        }
    }
}

/// Classify a raw contract address string
///
/// Ethereum: `0x` prefix followed by exactly 40 hex digits.
/// Solana: Base58 string decoding to exactly 32 bytes.
/// Anything else, including malformed Base58, is `None`.
pub fn classify(address: &str) -> Option<Chain> {
    if let Some(tail) = address.strip_prefix("0x") {
        if tail.len() == 40 && tail.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Some(Chain::Ethereum);
        }
        return None;
    }

    match bs58::decode(address).into_vec() {
        Ok(bytes) if bytes.len() == SOLANA_PUBKEY_LEN => Some(Chain::Solana),
        _ => None,
    }
}
