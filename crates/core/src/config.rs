//! Configuration structures for quote normalization.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main configuration for the normalization engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Exchange-rate configuration.
    #[serde(default)]
    pub rates: RateConfig,
    /// Incoterm freight-adder configuration.
    #[serde(default)]
    pub incoterms: IncotermConfig,
}

impl EngineConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Exchange-rate configuration.
///
/// Overrides are layered on top of the built-in static table, keyed by
/// currency code with the currency's value per USD. An external rate feed
/// can inject a full snapshot here; the engine itself never fetches rates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateConfig {
    /// Per-currency USD-value overrides.
    #[serde(default)]
    pub overrides: BTreeMap<String, Decimal>,
    /// When the injected rates were captured.
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
}

/// Incoterm freight-adder configuration.
///
/// Adders are fractions of the Ex-Works price. Buyers can override the
/// built-in industry-average estimates per RFQ.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncotermConfig {
    /// Per-incoterm adder overrides.
    #[serde(default)]
    pub overrides: BTreeMap<String, Decimal>,
}
