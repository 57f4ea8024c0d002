//! Currency cross rates via a USD pivot.
//!
//! Every rate is derived from each currency's value per USD, so any pair of
//! known currencies is convertible: rate(from, to) = usd(to) / usd(from).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::debug;

use rfq_core::{Error, Result};

/// Fractional digits kept on derived cross rates.
const RATE_SCALE: u32 = 6;

/// Static fallback rates: each currency's value per USD.
///
/// A live rate feed can replace these wholesale via [`RateTable::with_rates`];
/// the table itself never fetches anything.
const DEFAULT_USD_VALUES: &[(&str, Decimal)] = &[
    ("USD", dec!(1.0)),
    ("EUR", dec!(0.92)),
    ("GBP", dec!(0.79)),
    ("CAD", dec!(1.36)),
    ("MXN", dec!(17.15)),
    ("CNY", dec!(7.24)),
    ("JPY", dec!(149.5)),
    ("INR", dec!(83.1)),
    ("KRW", dec!(1320.0)),
    ("BRL", dec!(4.97)),
    ("AUD", dec!(1.53)),
    ("CHF", dec!(0.88)),
    ("SGD", dec!(1.34)),
    ("TWD", dec!(31.5)),
    ("THB", dec!(35.2)),
];

/// Currency rate table.
///
/// Read-only after construction; safe to share across threads.
#[derive(Debug, Clone)]
pub struct RateTable {
    /// Value of one USD in each currency, keyed by uppercase code.
    usd_values: HashMap<String, Decimal>,
    /// When the backing rates were captured (None for the static defaults).
    as_of: Option<DateTime<Utc>>,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            usd_values: DEFAULT_USD_VALUES
                .iter()
                .map(|(code, value)| (code.to_string(), *value))
                .collect(),
            as_of: None,
        }
    }
}

impl RateTable {
    /// Create a table backed by the static default rates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from a full rate snapshot, replacing the defaults.
    pub fn with_rates<I>(rates: I, as_of: Option<DateTime<Utc>>) -> Self
    where
        I: IntoIterator<Item = (String, Decimal)>,
    {
        let usd_values: HashMap<String, Decimal> = rates
            .into_iter()
            .map(|(code, value)| (code.trim().to_uppercase(), value))
            .collect();
        debug!(currencies = usd_values.len(), "rate table replaced");
        Self { usd_values, as_of }
    }

    /// Create a table from the defaults plus per-currency overrides.
    pub fn with_overrides<I>(overrides: I, as_of: Option<DateTime<Utc>>) -> Self
    where
        I: IntoIterator<Item = (String, Decimal)>,
    {
        let mut table = Self::default();
        for (code, value) in overrides {
            table.usd_values.insert(code.trim().to_uppercase(), value);
        }
        table.as_of = as_of;
        table
    }

    /// When the backing rates were captured.
    pub fn as_of(&self) -> Option<DateTime<Utc>> {
        self.as_of
    }

    /// Whether the table knows the given currency code.
    pub fn supports(&self, code: &str) -> bool {
        self.usd_values.contains_key(&code.trim().to_uppercase())
    }

    /// Look up a currency's value per USD.
    fn usd_value(&self, code: &str) -> Result<Decimal> {
        match self.usd_values.get(code) {
            // A zero or negative entry cannot price anything.
            Some(value) if value.is_sign_positive() && !value.is_zero() => Ok(*value),
            _ => Err(Error::unsupported_currency(code)),
        }
    }

    /// Exchange rate between two currencies.
    ///
    /// Returns 1 when the codes are equal (checked before any lookup, so an
    /// unknown code quoted against itself is not an error). Otherwise the
    /// cross rate through USD, rounded half-up to 6 decimal places.
    pub fn rate(&self, from: &str, to: &str) -> Result<Decimal> {
        let from = from.trim().to_uppercase();
        let to = to.trim().to_uppercase();
        if from == to {
            return Ok(Decimal::ONE);
        }
        let from_usd = self.usd_value(&from)?;
        let to_usd = self.usd_value(&to)?;
        Ok((to_usd / from_usd)
            .round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Convert an amount between currencies.
    pub fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal> {
        let rate = self.rate(from, to)?;
        if rate == Decimal::ONE {
            return Ok(amount);
        }
        Ok(amount * rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal::prelude::ToPrimitive;

    #[test]
    fn test_identity_rate() {
        let table = RateTable::new();
        assert_eq!(table.rate("USD", "USD").unwrap(), Decimal::ONE);
        // Equal codes short-circuit before the lookup, even for unknown ones.
        assert_eq!(table.rate("XYZ", "XYZ").unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_cross_rate_via_usd_pivot() {
        let table = RateTable::new();
        // EUR -> USD: 1 / 0.92 = 1.086956..., rounded to 6 dp.
        assert_eq!(table.rate("EUR", "USD").unwrap(), dec!(1.086957));
        // USD -> EUR is the stored USD value itself.
        assert_eq!(table.rate("USD", "EUR").unwrap(), dec!(0.92));
        // EUR -> GBP: 0.79 / 0.92.
        assert_eq!(table.rate("EUR", "GBP").unwrap(), dec!(0.858696));
    }

    #[test]
    fn test_case_insensitive_codes() {
        let table = RateTable::new();
        assert_eq!(
            table.rate("eur", "usd").unwrap(),
            table.rate("EUR", "USD").unwrap()
        );
    }

    #[test]
    fn test_unknown_currency() {
        let table = RateTable::new();
        let err = table.rate("XYZ", "USD").unwrap_err();
        assert!(matches!(err, Error::UnsupportedCurrency(_)));
        assert_eq!(err.to_string(), "Unsupported currency: XYZ");

        let err = table.rate("USD", "XYZ").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported currency: XYZ");
    }

    #[test]
    fn test_convert() {
        let table = RateTable::new();
        let converted = table.convert(dec!(10.00), "EUR", "USD").unwrap();
        assert_eq!(converted, dec!(10.86957));
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let table = RateTable::new();
        let amount = dec!(123.45);
        let there = table.convert(amount, "USD", "JPY").unwrap();
        let back = table.convert(there, "JPY", "USD").unwrap();
        assert_relative_eq!(
            back.to_f64().unwrap(),
            amount.to_f64().unwrap(),
            max_relative = 1e-4
        );
    }

    #[test]
    fn test_with_rates_replaces_defaults() {
        let as_of = Utc::now();
        let table = RateTable::with_rates(
            vec![
                ("USD".to_string(), dec!(1.0)),
                ("eur".to_string(), dec!(0.95)),
            ],
            Some(as_of),
        );
        assert_eq!(table.rate("EUR", "USD").unwrap(), dec!(1.052632));
        assert_eq!(table.as_of(), Some(as_of));
        // Currencies outside the snapshot are gone.
        assert!(table.rate("GBP", "USD").is_err());
    }

    #[test]
    fn test_with_overrides_keeps_defaults() {
        let table = RateTable::with_overrides(vec![("EUR".to_string(), dec!(0.95))], None);
        assert_eq!(table.rate("USD", "EUR").unwrap(), dec!(0.95));
        // Non-overridden currencies still resolve.
        assert_eq!(table.rate("USD", "GBP").unwrap(), dec!(0.79));
    }

    #[test]
    fn test_zero_rate_is_unsupported() {
        let table = RateTable::with_rates(
            vec![
                ("USD".to_string(), dec!(1.0)),
                ("BAD".to_string(), dec!(0)),
            ],
            None,
        );
        assert!(table.rate("BAD", "USD").is_err());
    }
}
