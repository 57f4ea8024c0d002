//! Incoterm freight adjustment.
//!
//! Each incoterm maps to an approximate freight/duty cost as a fraction of
//! the Ex-Works price. Adjustment always pivots through an implied Ex-Works
//! baseline so any pair of terms is comparable.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Incoterm assumed when a quote or target does not specify one.
pub const DEFAULT_INCOTERM: &str = "FOB";

/// Adder used for incoterm codes missing from the table (same as FOB).
const FALLBACK_ADDER: Decimal = dec!(0.05);

/// Industry-average freight adders as a fraction of Ex-Works price.
/// Buyers can override these per RFQ.
const DEFAULT_ADDERS: &[(&str, Decimal)] = &[
    ("EXW", dec!(0.00)), // Ex Works: buyer pays everything
    ("FCA", dec!(0.02)), // Free Carrier
    ("FOB", dec!(0.05)), // Free On Board (baseline)
    ("CFR", dec!(0.08)), // Cost and Freight
    ("CIF", dec!(0.10)), // Cost, Insurance, Freight
    ("DAP", dec!(0.12)), // Delivered At Place
    ("DDP", dec!(0.15)), // Delivered Duty Paid: supplier pays everything
];

/// Incoterm freight-adder table. Lookups are case-insensitive; unknown codes
/// fall back to the FOB adder rather than failing.
#[derive(Debug, Clone)]
pub struct IncotermTable {
    adders: HashMap<String, Decimal>,
}

impl Default for IncotermTable {
    fn default() -> Self {
        Self {
            adders: DEFAULT_ADDERS
                .iter()
                .map(|(code, adder)| (code.to_string(), *adder))
                .collect(),
        }
    }
}

impl IncotermTable {
    /// Create a table with the built-in adders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with per-incoterm adder overrides on the defaults.
    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, Decimal)>,
    {
        let mut table = Self::default();
        for (code, adder) in overrides {
            table.adders.insert(code.trim().to_uppercase(), adder);
        }
        table
    }

    /// Freight adder for an incoterm code.
    pub fn adder(&self, code: &str) -> Decimal {
        self.adders
            .get(&code.trim().to_uppercase())
            .copied()
            .unwrap_or(FALLBACK_ADDER)
    }

    /// Adjust a price from one incoterm basis to another.
    ///
    /// Identity when the codes match. Otherwise the price is stripped back to
    /// an implied Ex-Works baseline, then the target term's freight is added:
    /// `exw = price / (1 + adder(from)); result = exw * (1 + adder(to))`.
    pub fn adjust(&self, price: Decimal, from_incoterm: &str, to_incoterm: &str) -> Decimal {
        let from = from_incoterm.trim().to_uppercase();
        let to = to_incoterm.trim().to_uppercase();
        if from == to {
            return price;
        }
        let exw_price = price / (Decimal::ONE + self.adder(&from));
        exw_price * (Decimal::ONE + self.adder(&to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_when_codes_match() {
        let table = IncotermTable::new();
        assert_eq!(table.adjust(dec!(10.00), "FOB", "FOB"), dec!(10.00));
        // Unknown codes still short-circuit on equality.
        assert_eq!(table.adjust(dec!(10.00), "ZZZ", "zzz"), dec!(10.00));
    }

    #[test]
    fn test_exw_pivot() {
        let table = IncotermTable::new();
        // FOB -> CIF: 10 / 1.05 * 1.10.
        let adjusted = table.adjust(dec!(10.00), "FOB", "CIF");
        assert_eq!(adjusted.round_dp(6), dec!(10.476190));

        // CIF -> EXW strips all freight.
        let adjusted = table.adjust(dec!(11.00), "CIF", "EXW");
        assert_eq!(adjusted.round_dp(6), dec!(10.000000));
    }

    #[test]
    fn test_unknown_code_uses_fob_adder() {
        let table = IncotermTable::new();
        assert_eq!(table.adder("ZZZ"), dec!(0.05));
        // An unknown code priced like FOB converts to FOB with no change.
        let adjusted = table.adjust(dec!(10.00), "ZZZ", "FOB");
        assert_eq!(adjusted.round_dp(10), dec!(10));
    }

    #[test]
    fn test_overrides() {
        let table = IncotermTable::with_overrides(vec![("CIF".to_string(), dec!(0.20))]);
        assert_eq!(table.adder("CIF"), dec!(0.20));
        // Non-overridden codes keep their defaults.
        assert_eq!(table.adder("FOB"), dec!(0.05));
    }

    #[test]
    fn test_case_insensitive_codes() {
        let table = IncotermTable::new();
        assert_eq!(table.adder("cif"), dec!(0.10));
        assert_eq!(
            table.adjust(dec!(10.00), "fob", "CIF"),
            table.adjust(dec!(10.00), "FOB", "cif")
        );
    }
}
