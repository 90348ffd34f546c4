//! Currency formatting for decimal amounts.
//!
//! Catalog and cart records carry bare decimal amounts; the store currency is
//! a deployment setting. [`CurrencyCode::format`] renders an amount following
//! the conventions of the currency's home locale (es-CL for pesos, en-US for
//! dollars, es-ES for euros).

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ISO 4217 currency codes supported by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Chilean peso. No minor units in everyday use.
    #[default]
    CLP,
    USD,
    EUR,
}

/// Returned when parsing an unsupported currency code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported currency code: {0}")]
pub struct UnknownCurrency(pub String);

impl CurrencyCode {
    /// Currency symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::CLP | Self::USD => "$",
            Self::EUR => "€",
        }
    }

    /// ISO code string.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::CLP => "CLP",
            Self::USD => "USD",
            Self::EUR => "EUR",
        }
    }

    /// Digits shown after the decimal separator.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Self::CLP => 0,
            Self::USD | Self::EUR => 2,
        }
    }

    const fn group_separator(self) -> char {
        match self {
            Self::CLP | Self::EUR => '.',
            Self::USD => ',',
        }
    }

    const fn decimal_separator(self) -> char {
        match self {
            Self::CLP | Self::EUR => ',',
            Self::USD => '.',
        }
    }

    const fn symbol_after(self) -> bool {
        matches!(self, Self::EUR)
    }

    /// Format an amount the way the currency's home locale does.
    ///
    /// ```rust
    /// # use repuestos_core::CurrencyCode;
    /// # use rust_decimal::Decimal;
    /// assert_eq!(CurrencyCode::CLP.format(Decimal::from(19990)), "$19.990");
    /// assert_eq!(CurrencyCode::USD.format(Decimal::new(123_456, 2)), "$1,234.56");
    /// assert_eq!(CurrencyCode::EUR.format(Decimal::new(123_456, 2)), "1.234,56 €");
    /// ```
    #[must_use]
    pub fn format(self, amount: Decimal) -> String {
        let precision = self.minor_units();
        let rounded = amount.round_dp(precision);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();

        let digits = format!("{:.*}", precision as usize, rounded.abs());
        let (whole, fraction) = digits
            .split_once('.')
            .map_or((digits.as_str(), None), |(w, f)| (w, Some(f)));

        let mut number = group_thousands(whole, self.group_separator());
        if let Some(fraction) = fraction.filter(|_| precision > 0) {
            number.push(self.decimal_separator());
            number.push_str(fraction);
        }

        let sign = if negative { "-" } else { "" };
        if self.symbol_after() {
            format!("{sign}{number} {}", self.symbol())
        } else {
            format!("{sign}{}{number}", self.symbol())
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CLP" => Ok(Self::CLP),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            _ => Err(UnknownCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Insert `sep` between every group of three digits, counting from the right.
fn group_thousands(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clp_groups_with_dots_and_drops_decimals() {
        assert_eq!(CurrencyCode::CLP.format(Decimal::from(3990)), "$3.990");
        assert_eq!(CurrencyCode::CLP.format(Decimal::from(30000)), "$30.000");
        assert_eq!(CurrencyCode::CLP.format(Decimal::from(1_250_000)), "$1.250.000");
        assert_eq!(CurrencyCode::CLP.format(Decimal::from(990)), "$990");
        assert_eq!(CurrencyCode::CLP.format(Decimal::ZERO), "$0");
    }

    #[test]
    fn test_clp_rounds_fractional_amounts() {
        assert_eq!(CurrencyCode::CLP.format(Decimal::new(39_906, 1)), "$3.991");
    }

    #[test]
    fn test_usd_formatting() {
        assert_eq!(CurrencyCode::USD.format(Decimal::from(5)), "$5.00");
        assert_eq!(CurrencyCode::USD.format(Decimal::new(1_999, 2)), "$19.99");
        assert_eq!(CurrencyCode::USD.format(Decimal::new(-250, 2)), "-$2.50");
    }

    #[test]
    fn test_eur_puts_symbol_after() {
        assert_eq!(CurrencyCode::EUR.format(Decimal::new(99, 1)), "9,90 €");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("clp".parse::<CurrencyCode>().unwrap(), CurrencyCode::CLP);
        assert_eq!(" USD ".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert!("ARS".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1", '.'), "1");
        assert_eq!(group_thousands("123", '.'), "123");
        assert_eq!(group_thousands("1234", '.'), "1.234");
        assert_eq!(group_thousands("123456789", ','), "123,456,789");
    }
}
