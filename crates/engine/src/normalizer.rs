//! Quote normalization pipeline.
//!
//! Reduces heterogeneous supplier quotes (currency, unit of measure,
//! incoterm, MOQ, lead time) to the buyer's terms so competing offers can be
//! compared on a single basis. Each quote is processed independently; one
//! quote's failure never affects another.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use rfq_conversion::{IncotermTable, RateTable, UnitTable, DEFAULT_INCOTERM};
use rfq_core::{
    EngineConfig, Error, NormalizationDetails, NormalizationResult, NormalizationTarget,
    NormalizedQuote, PriceBasis, Quote, RankingEntry, Result,
};

use crate::{lead_time, ranking};

/// Decimal places on the reported normalized unit price.
const UNIT_PRICE_SCALE: u32 = 4;
/// Decimal places on the reported normalized total.
const TOTAL_SCALE: u32 = 2;

/// Normalizes supplier quotes to a common basis for side-by-side comparison.
///
/// Holds the three conversion tables, all read-only after construction, so a
/// single engine can serve concurrent callers and multiple engines with
/// different rate snapshots can coexist.
pub struct NormalizationEngine {
    rates: RateTable,
    units: UnitTable,
    incoterms: IncotermTable,
}

impl Default for NormalizationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizationEngine {
    /// Create an engine backed by the built-in static tables.
    pub fn new() -> Self {
        Self::with_tables(RateTable::new(), UnitTable::new(), IncotermTable::new())
    }

    /// Create an engine with an injected rate table (for live-rate snapshots).
    pub fn with_rates(rates: RateTable) -> Self {
        Self::with_tables(rates, UnitTable::new(), IncotermTable::new())
    }

    /// Create an engine with explicit tables.
    pub fn with_tables(rates: RateTable, units: UnitTable, incoterms: IncotermTable) -> Self {
        Self {
            rates,
            units,
            incoterms,
        }
    }

    /// Create an engine from a configuration, layering rate and incoterm
    /// overrides on top of the built-in tables.
    pub fn from_config(config: &EngineConfig) -> Self {
        let rates = RateTable::with_overrides(
            config
                .rates
                .overrides
                .iter()
                .map(|(code, value)| (code.clone(), *value)),
            config.rates.as_of,
        );
        let incoterms = IncotermTable::with_overrides(
            config
                .incoterms
                .overrides
                .iter()
                .map(|(code, adder)| (code.clone(), *adder)),
        );
        Self::with_tables(rates, UnitTable::new(), incoterms)
    }

    /// The rate table backing this engine.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Normalize a batch of quotes to the buyer's terms.
    ///
    /// Every input quote produces exactly one output record, in input order:
    /// a normalized record on success, an error record (null price/total plus
    /// a message) on failure. Successfully normalized quotes are ranked
    /// ascending by unit price, and batch warnings collect per-quote failures
    /// plus a savings-opportunity note when the ranking has at least two
    /// entries.
    pub fn normalize_quotes(
        &self,
        target: &NormalizationTarget,
        quotes: &[Quote],
    ) -> NormalizationResult {
        let base_currency = target.currency.trim().to_uppercase();
        let base_incoterm = effective_incoterm(target.incoterm.as_deref());
        let target_uom = target.unit_of_measure.trim().to_lowercase();

        let mut normalized = Vec::with_capacity(quotes.len());
        let mut warnings = Vec::new();

        for quote in quotes {
            match self.normalize_single(
                quote,
                &base_currency,
                &target_uom,
                &base_incoterm,
                target.quantity,
            ) {
                Ok(record) => normalized.push(record),
                Err(err) => {
                    warn!(
                        supplier = quote.display_name(),
                        error = %err,
                        "quote normalization failed"
                    );
                    warnings.push(format!(
                        "Could not normalize quote from {}: {}",
                        quote.display_name(),
                        err
                    ));
                    normalized.push(NormalizedQuote::failed(quote.clone(), err.to_string()));
                }
            }
        }

        let ranking: Vec<RankingEntry> = ranking::rank_quotes(&normalized);
        if let Some(message) = ranking::savings_message(&ranking) {
            warnings.insert(0, message);
        }

        NormalizationResult {
            base_currency,
            base_uom: target.unit_of_measure.clone(),
            base_incoterm,
            normalized_quotes: normalized,
            ranking,
            warnings,
        }
    }

    /// Normalize a single quote: currency, then unit of measure, then
    /// incoterm, then totals and scoring.
    fn normalize_single(
        &self,
        quote: &Quote,
        target_currency: &str,
        target_uom: &str,
        target_incoterm: &str,
        buyer_quantity: Option<Decimal>,
    ) -> Result<NormalizedQuote> {
        let original_price = quote
            .unit_price
            .ok_or_else(|| Error::malformed_quote("missing unit price"))?;
        if original_price.is_sign_negative() {
            return Err(Error::malformed_quote("negative unit price"));
        }

        let source_currency = quote.currency.trim().to_uppercase();
        let source_uom = {
            let trimmed = quote.unit_of_measure.trim();
            if trimmed.is_empty() {
                target_uom.to_string()
            } else {
                trimmed.to_lowercase()
            }
        };
        let source_incoterm = effective_incoterm(quote.incoterm.as_deref());

        let exchange_rate = self.rates.rate(&source_currency, target_currency)?;
        let price_in_currency = self
            .rates
            .convert(original_price, &source_currency, target_currency)?;
        let uom = self
            .units
            .convert_price(price_in_currency, &source_uom, target_uom);
        let landed = self
            .incoterms
            .adjust(uom.price, &source_incoterm, target_incoterm);

        let quantity = buyer_quantity
            .or(quote.quantity_offered)
            .unwrap_or(Decimal::ONE);
        let total = (landed * quantity)
            .round_dp_with_strategy(TOTAL_SCALE, RoundingStrategy::MidpointAwayFromZero);
        let unit_price =
            landed.round_dp_with_strategy(UNIT_PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);

        let moq_warning = match (quote.moq, buyer_quantity) {
            (Some(moq), Some(qty)) if moq > qty => Some(format!(
                "MOQ ({}) exceeds your requested quantity ({})",
                moq, qty
            )),
            _ => None,
        };

        Ok(NormalizedQuote {
            currency_converted: source_currency != target_currency,
            uom_converted: uom.converted,
            incoterm_adjusted: source_incoterm != target_incoterm,
            normalized_unit_price: Some(unit_price),
            normalized_total: Some(total),
            exchange_rate_used: Some(exchange_rate),
            lead_time_score: lead_time::score_lead_time(quote.lead_time_days),
            moq_warning,
            details: Some(NormalizationDetails {
                original: PriceBasis {
                    price: original_price,
                    currency: source_currency,
                    unit_of_measure: source_uom,
                    incoterm: source_incoterm,
                },
                normalized: PriceBasis {
                    price: landed,
                    currency: target_currency.to_string(),
                    unit_of_measure: target_uom.to_string(),
                    incoterm: target_incoterm.to_string(),
                },
            }),
            error: None,
            quote: quote.clone(),
        })
    }
}

/// Uppercased incoterm code, defaulting when absent or blank.
fn effective_incoterm(code: Option<&str>) -> String {
    match code.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_uppercase(),
        _ => DEFAULT_INCOTERM.to_string(),
    }
}
