//! Core data types for quote normalization.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A supplier quote as received. Immutable input: the engine never mutates
/// caller-supplied quotes, it produces new derived records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Supplier identifier.
    pub supplier_id: String,
    /// Supplier display name.
    pub supplier_name: String,
    /// Unit price in the supplier's own currency. Absent when the supplier
    /// submitted no usable price.
    pub unit_price: Option<Decimal>,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Unit of measure the price is quoted per. Empty falls back to the
    /// buyer's unit at normalization time.
    pub unit_of_measure: String,
    /// Quantity the supplier is offering.
    #[serde(default)]
    pub quantity_offered: Option<Decimal>,
    /// Minimum order quantity the supplier will accept.
    #[serde(default)]
    pub moq: Option<Decimal>,
    /// Quoted lead time in days.
    #[serde(default)]
    pub lead_time_days: Option<u32>,
    /// Incoterm the price is quoted under (defaults to FOB).
    #[serde(default)]
    pub incoterm: Option<String>,
}

impl Quote {
    /// Name to use in warnings: supplier name, falling back to id.
    pub fn display_name(&self) -> &str {
        if !self.supplier_name.is_empty() {
            &self.supplier_name
        } else if !self.supplier_id.is_empty() {
            &self.supplier_id
        } else {
            "Unknown"
        }
    }
}

/// The buyer's terms that all quotes are normalized to. Supplied once per
/// comparison request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationTarget {
    /// Buyer's currency code.
    pub currency: String,
    /// Buyer's unit of measure.
    pub unit_of_measure: String,
    /// Buyer's requested quantity, used for total-price calculation. When
    /// absent, each quote's own offered quantity is used instead.
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// Buyer's incoterm (defaults to FOB).
    #[serde(default)]
    pub incoterm: Option<String>,
}

impl NormalizationTarget {
    /// Create a target with the required currency and unit of measure.
    pub fn new(currency: impl Into<String>, unit_of_measure: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            unit_of_measure: unit_of_measure.into(),
            quantity: None,
            incoterm: None,
        }
    }
}

/// A price expressed in a specific currency/UoM/incoterm basis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBasis {
    pub price: Decimal,
    pub currency: String,
    pub unit_of_measure: String,
    pub incoterm: String,
}

/// Original vs. normalized price breakdown for a single quote.
///
/// The normalized price is kept at full precision here; the rounded value
/// lives on [`NormalizedQuote::normalized_unit_price`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationDetails {
    pub original: PriceBasis,
    pub normalized: PriceBasis,
}

/// A quote after normalization to the buyer's terms.
///
/// On conversion failure the record carries a null price/total and an error
/// message instead of being dropped from the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedQuote {
    /// Original quote.
    pub quote: Quote,
    /// Unit price in the target basis, rounded to 4 decimal places.
    pub normalized_unit_price: Option<Decimal>,
    /// Unit price times effective quantity, rounded to 2 decimal places.
    pub normalized_total: Option<Decimal>,
    /// Whether a currency conversion was applied.
    pub currency_converted: bool,
    /// Whether a unit-of-measure conversion was actually applied.
    /// Incompatible or unknown units pass through with this flag false.
    pub uom_converted: bool,
    /// Whether an incoterm adjustment was applied.
    pub incoterm_adjusted: bool,
    /// Exchange rate applied during currency conversion (1 when none).
    pub exchange_rate_used: Option<Decimal>,
    /// Lead-time score on a 0-100 scale, higher is better.
    pub lead_time_score: Option<u8>,
    /// Warning when the supplier's MOQ exceeds the buyer's quantity.
    pub moq_warning: Option<String>,
    /// Original vs. normalized breakdown.
    pub details: Option<NormalizationDetails>,
    /// Error message when normalization failed for this quote.
    pub error: Option<String>,
}

impl NormalizedQuote {
    /// Create an error record for a quote that could not be normalized.
    pub fn failed(quote: Quote, error: impl Into<String>) -> Self {
        Self {
            quote,
            normalized_unit_price: None,
            normalized_total: None,
            currency_converted: false,
            uom_converted: false,
            incoterm_adjusted: false,
            exchange_rate_used: None,
            lead_time_score: None,
            moq_warning: None,
            details: None,
            error: Some(error.into()),
        }
    }

    /// Whether this quote was successfully normalized.
    pub fn is_normalized(&self) -> bool {
        self.normalized_unit_price.is_some()
    }
}

/// One row of the comparison ranking. Only successfully normalized quotes
/// participate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1-based rank, ascending by normalized unit price.
    pub rank: u32,
    pub supplier_id: String,
    pub supplier_name: String,
    pub normalized_unit_price: Decimal,
}

/// Output of a comparison request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationResult {
    /// Currency all quotes were converted to.
    pub base_currency: String,
    /// Unit of measure all quotes were converted to.
    pub base_uom: String,
    /// Incoterm all quotes were adjusted to.
    pub base_incoterm: String,
    /// One record per input quote, in input order.
    pub normalized_quotes: Vec<NormalizedQuote>,
    /// Ranked quotes, cheapest first.
    pub ranking: Vec<RankingEntry>,
    /// Batch-level warnings (savings opportunity, per-quote failures).
    pub warnings: Vec<String>,
}
