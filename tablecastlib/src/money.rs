//! Monetary amounts.
//!
//! A `Money` renders the same way in HTML and CSV: currency symbol (or ISO
//! code), grouped thousands and the currency's number of minor-unit digits,
//! e.g. `$1,234.50`, `-€3.00`, `¥500`, `CHF 10.00`.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

/// An amount in a given ISO 4217 currency
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Money {
    /// The amount, in major units (dollars, not cents)
    pub amount: Decimal,
    /// ISO 4217 currency code, upper case
    pub currency: String,
}

impl Money {
    /// Create an amount of `currency`
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into().to_uppercase(),
        }
    }

    /// Shorthand for US dollars
    pub fn usd(amount: Decimal) -> Self {
        Self::new(amount, "USD")
    }

    /// Number of digits after the decimal point for this currency
    pub fn minor_units(&self) -> u32 {
        match self.currency.as_str() {
            "JPY" | "KRW" | "VND" | "CLP" | "ISK" => 0,
            "BHD" | "KWD" | "OMR" | "JOD" | "TND" => 3,
            _ => 2,
        }
    }

    /// Prefix used in front of the amount
    fn prefix(&self) -> String {
        match self.currency.as_str() {
            "USD" => "$".to_string(),
            "EUR" => "€".to_string(),
            "GBP" => "£".to_string(),
            "JPY" => "¥".to_string(),
            "INR" => "₹".to_string(),
            "KRW" => "₩".to_string(),
            "CAD" => "CA$".to_string(),
            "AUD" => "A$".to_string(),
            code => format!("{} ", code),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.minor_units();
        let rounded = self
            .amount
            .round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let plain = format!("{:.*}", digits as usize, rounded.abs());
        let (whole, fraction) = match plain.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (plain.as_str(), None),
        };

        write!(f, "{}{}{}", sign, self.prefix(), group_thousands(whole))?;
        if let Some(fraction) = fraction {
            write!(f, ".{}", fraction)?;
        }
        Ok(())
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_usd_grouping_and_cents() {
        assert_eq!(Money::usd(dec("1234.5")).to_string(), "$1,234.50");
        assert_eq!(Money::usd(dec("1234567")).to_string(), "$1,234,567.00");
        assert_eq!(Money::usd(dec("12")).to_string(), "$12.00");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(Money::new(dec("-3"), "eur").to_string(), "-€3.00");
    }

    #[test]
    fn test_zero_decimal_currency() {
        assert_eq!(Money::new(dec("500"), "JPY").to_string(), "¥500");
    }

    #[test]
    fn test_unknown_symbol_uses_code() {
        assert_eq!(Money::new(dec("10"), "CHF").to_string(), "CHF 10.00");
    }

    #[test]
    fn test_rounds_half_even() {
        assert_eq!(Money::usd(dec("0.125")).to_string(), "$0.12");
        assert_eq!(Money::usd(dec("0.135")).to_string(), "$0.14");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
    }
}
