//! Unit-of-measure price conversion.
//!
//! Units are grouped by base dimension (mass, length, volume, count, plus
//! packaging units that only equal themselves). Prices convert only within a
//! dimension; anything else passes through unchanged and is flagged as not
//! converted.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The physical quantity class a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseDimension {
    /// Mass, base unit kg.
    Mass,
    /// Length, base unit meters.
    Length,
    /// Volume, base unit liters.
    Volume,
    /// Discrete pieces (each/pcs/units).
    Count,
    // Packaging units carry no conversion factor to anything else.
    Set,
    Lot,
    Roll,
    Sheet,
    Box,
    Pallet,
}

/// Default unit table: token, dimension, factor to the dimension's base unit.
const DEFAULT_UNITS: &[(&str, BaseDimension, Decimal)] = &[
    // Mass
    ("kg", BaseDimension::Mass, dec!(1.0)),
    ("lbs", BaseDimension::Mass, dec!(0.453592)),
    ("lb", BaseDimension::Mass, dec!(0.453592)),
    ("tons", BaseDimension::Mass, dec!(1000.0)),
    ("oz", BaseDimension::Mass, dec!(0.0283495)),
    ("g", BaseDimension::Mass, dec!(0.001)),
    // Length
    ("meters", BaseDimension::Length, dec!(1.0)),
    ("feet", BaseDimension::Length, dec!(0.3048)),
    ("ft", BaseDimension::Length, dec!(0.3048)),
    ("inches", BaseDimension::Length, dec!(0.0254)),
    ("in", BaseDimension::Length, dec!(0.0254)),
    ("yards", BaseDimension::Length, dec!(0.9144)),
    ("yd", BaseDimension::Length, dec!(0.9144)),
    ("mm", BaseDimension::Length, dec!(0.001)),
    ("cm", BaseDimension::Length, dec!(0.01)),
    // Volume
    ("liters", BaseDimension::Volume, dec!(1.0)),
    ("gallons", BaseDimension::Volume, dec!(3.78541)),
    ("gal", BaseDimension::Volume, dec!(3.78541)),
    ("ml", BaseDimension::Volume, dec!(0.001)),
    // Count
    ("each", BaseDimension::Count, dec!(1.0)),
    ("pcs", BaseDimension::Count, dec!(1.0)),
    ("units", BaseDimension::Count, dec!(1.0)),
    // Packaging
    ("sets", BaseDimension::Set, dec!(1.0)),
    ("lots", BaseDimension::Lot, dec!(1.0)),
    ("rolls", BaseDimension::Roll, dec!(1.0)),
    ("sheets", BaseDimension::Sheet, dec!(1.0)),
    ("boxes", BaseDimension::Box, dec!(1.0)),
    ("pallets", BaseDimension::Pallet, dec!(1.0)),
];

/// A unit's dimension and factor to the dimension's base unit.
#[derive(Debug, Clone, Copy)]
struct UnitEntry {
    dimension: BaseDimension,
    to_base: Decimal,
}

/// Outcome of a unit-of-measure price conversion.
#[derive(Debug, Clone, Copy)]
pub struct UomConversion {
    /// Price per target unit (or the input price on pass-through).
    pub price: Decimal,
    /// Whether a conversion was actually applied.
    pub converted: bool,
}

impl UomConversion {
    fn pass_through(price: Decimal) -> Self {
        Self {
            price,
            converted: false,
        }
    }
}

/// Unit-of-measure conversion table. Lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct UnitTable {
    units: HashMap<String, UnitEntry>,
}

impl Default for UnitTable {
    fn default() -> Self {
        Self {
            units: DEFAULT_UNITS
                .iter()
                .map(|(token, dimension, to_base)| {
                    (
                        token.to_string(),
                        UnitEntry {
                            dimension: *dimension,
                            to_base: *to_base,
                        },
                    )
                })
                .collect(),
        }
    }
}

impl UnitTable {
    /// Create a table with the built-in units.
    pub fn new() -> Self {
        Self::default()
    }

    /// The base dimension of a unit token, if known.
    pub fn dimension_of(&self, unit: &str) -> Option<BaseDimension> {
        self.units
            .get(&unit.trim().to_lowercase())
            .map(|entry| entry.dimension)
    }

    /// Convert a per-unit price between units of measure.
    ///
    /// Price-per-unit conversion is the inverse of quantity conversion: the
    /// price is divided by the quantity factor `factor(from) / factor(to)`.
    /// Identical tokens, unknown tokens, and dimension mismatches all pass
    /// through unchanged with `converted` false.
    pub fn convert_price(
        &self,
        price_per_unit: Decimal,
        from_unit: &str,
        to_unit: &str,
    ) -> UomConversion {
        let from = from_unit.trim().to_lowercase();
        let to = to_unit.trim().to_lowercase();
        if from == to {
            return UomConversion::pass_through(price_per_unit);
        }
        let (Some(from_entry), Some(to_entry)) = (self.units.get(&from), self.units.get(&to))
        else {
            return UomConversion::pass_through(price_per_unit);
        };
        if from_entry.dimension != to_entry.dimension {
            return UomConversion::pass_through(price_per_unit);
        }
        let factor = from_entry.to_base / to_entry.to_base;
        UomConversion {
            price: price_per_unit / factor,
            converted: true,
        }
    }
}
