//! Error handling for the application

use thiserror::Error;

/// Fetch-path errors
///
/// Everything except `InvalidAddress` is recoverable at the poll-loop level:
/// the tick degrades to an error display and the next tick retries naturally.
#[derive(Error, Debug, Clone)]
pub enum FetchError {
    #[error("Invalid address format: {0}")]
    InvalidAddress(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("No trading pairs returned for token")]
    NoLiquidity,

    #[error("No pair matches the address chain with a usable price")]
    NoMatchingPair,

    #[error("Malformed upstream payload: {0}")]
    ParseError(String),
}

impl FetchError {
    /// Whether the next poll tick may succeed without new user input.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FetchError::InvalidAddress(_))
    }
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_invalid_address_needs_new_input() {
        assert!(!FetchError::InvalidAddress("x".to_string()).is_retryable());
        assert!(FetchError::UpstreamUnavailable("HTTP 500".to_string()).is_retryable());
        assert!(FetchError::NoLiquidity.is_retryable());
        assert!(FetchError::NoMatchingPair.is_retryable());
        assert!(FetchError::ParseError("bad json".to_string()).is_retryable());
    }
}
