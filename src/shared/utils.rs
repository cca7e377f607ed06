//! Utility functions and helpers

/// Format a USD price with meme-coin precision
pub fn format_price(price: f64) -> String {
    format!("${:.8}", price)
}

/// Format a 24h change percentage with sign
pub fn format_change(change: f64) -> String {
    format!("{:+.2}% (24h)", change)
}

/// Shorten a contract address for log and alert labels
pub fn short_address(address: &str) -> String {
    if address.len() <= 12 {
        return address.to_string();
    }
    format!("{}..{}", &address[..6], &address[address.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.00001234), "$0.00001234");
    }

    #[test]
    fn test_format_change_keeps_sign() {
        assert_eq!(format_change(-3.5), "-3.50% (24h)");
        assert_eq!(format_change(1.0), "+1.00% (24h)");
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("FasH397CeZLNYWkd3wWK9vrmjd1z93n3b59DssRXpump"),
            "FasH39..pump"
        );
        assert_eq!(short_address("short"), "short");
    }
}
