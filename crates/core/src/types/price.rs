//! Price display helpers.
//!
//! Prices are plain `Decimal` amounts in USD; the remote store column is
//! `numeric`. Arithmetic stays in `Decimal` everywhere - formatting happens
//! only at the view boundary.

use rust_decimal::Decimal;

/// Format a decimal amount as a display price, e.g. `$12.50`.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_two_decimal_places() {
        assert_eq!(format_usd(Decimal::new(36, 0)), "$36.00");
        assert_eq!(format_usd(Decimal::new(1250, 2)), "$12.50");
    }
}
