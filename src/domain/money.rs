use crate::error::KioskError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Label shown wherever a price would appear for a free event.
pub const FREE_LABEL: &str = "Free";

/// The package price charged per session.
///
/// A zero price is allowed and treated exactly like an absent one: the event
/// is free and every price slot renders [`FREE_LABEL`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Result<Self, KioskError> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(KioskError::ConfigError(
                "Price must not be negative".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_free(&self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Decimal> for Price {
    type Error = KioskError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// Renders the configured price, or [`FREE_LABEL`] when there is nothing to pay.
pub fn price_label(price: Option<Price>, currency: &str) -> String {
    match price {
        Some(price) if !price.is_free() => format_currency(price.value(), currency),
        _ => FREE_LABEL.to_string(),
    }
}

/// Formats an amount the way an en-US point of sale prints it: symbol first,
/// thousands separated by commas, minor units padded.
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let (prefix, decimals) = match code.as_str() {
        "USD" => ("$".to_string(), 2),
        "CAD" => ("CA$".to_string(), 2),
        "AUD" => ("A$".to_string(), 2),
        "EUR" => ("€".to_string(), 2),
        "GBP" => ("£".to_string(), 2),
        "JPY" => ("¥".to_string(), 0),
        other => (format!("{} ", other), 2),
    };

    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.*}", decimals as usize, rounded.abs());
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{}{}{}.{}", sign, prefix, grouped, fraction),
        None => format!("{}{}{}", sign, prefix, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_validation() {
        assert!(Price::new(dec!(0)).is_ok());
        assert!(Price::new(dec!(12.50)).is_ok());
        assert!(matches!(
            Price::new(dec!(-1)),
            Err(KioskError::ConfigError(_))
        ));
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_currency(dec!(12.5), "USD"), "$12.50");
        assert_eq!(format_currency(dec!(12.50), "usd"), "$12.50");
        assert_eq!(format_currency(dec!(1234.5), "USD"), "$1,234.50");
        assert_eq!(format_currency(dec!(1000000), "USD"), "$1,000,000.00");
        assert_eq!(format_currency(dec!(0.005), "USD"), "$0.01");
    }

    #[test]
    fn test_format_other_currencies() {
        assert_eq!(format_currency(dec!(9.99), "EUR"), "€9.99");
        assert_eq!(format_currency(dec!(12.5), "CAD"), "CA$12.50");
        assert_eq!(format_currency(dec!(1250), "aud"), "A$1,250.00");
        assert_eq!(format_currency(dec!(5), "GBP"), "£5.00");
        assert_eq!(format_currency(dec!(1500), "JPY"), "¥1,500");
        assert_eq!(format_currency(dec!(20), "CHF"), "CHF 20.00");
    }

    #[test]
    fn test_price_label_free_when_zero_or_absent() {
        assert_eq!(price_label(None, "USD"), FREE_LABEL);
        assert_eq!(price_label(Some(Price::new(dec!(0)).unwrap()), "USD"), FREE_LABEL);
        assert_eq!(
            price_label(Some(Price::new(dec!(12.50)).unwrap()), "USD"),
            "$12.50"
        );
    }
}
