//! Ranking of normalized quotes.
//!
//! Only quotes that normalized successfully participate; error records stay
//! in the batch output but receive no rank.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use rfq_core::{NormalizedQuote, RankingEntry};

/// Rank quotes ascending by normalized unit price.
///
/// The sort is stable: quotes with equal prices keep their input order.
/// Ranks are 1-based and contiguous.
pub fn rank_quotes(normalized: &[NormalizedQuote]) -> Vec<RankingEntry> {
    let mut ranked: Vec<(&NormalizedQuote, Decimal)> = normalized
        .iter()
        .filter_map(|record| record.normalized_unit_price.map(|price| (record, price)))
        .collect();
    ranked.sort_by_key(|(_, price)| *price);

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, (record, price))| RankingEntry {
            rank: (i + 1) as u32,
            supplier_id: record.quote.supplier_id.clone(),
            supplier_name: record.quote.supplier_name.clone(),
            normalized_unit_price: price,
        })
        .collect()
}

/// Savings-opportunity message for a ranking with at least two entries.
///
/// Reports the spread between the cheapest and most expensive normalized
/// unit price as a percentage of the most expensive, at one decimal place.
pub fn savings_message(ranking: &[RankingEntry]) -> Option<String> {
    if ranking.len() < 2 {
        return None;
    }
    let best = ranking.first()?.normalized_unit_price;
    let worst = ranking.last()?.normalized_unit_price;
    if worst <= Decimal::ZERO {
        return None;
    }
    let pct = ((worst - best) / worst * dec!(100))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    Some(format!(
        "Potential savings: {}% between lowest and highest quote.",
        pct
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfq_core::Quote;

    fn make_record(id: &str, price: Option<Decimal>) -> NormalizedQuote {
        let quote = Quote {
            supplier_id: id.to_string(),
            supplier_name: format!("Supplier {}", id),
            unit_price: price,
            currency: "USD".to_string(),
            unit_of_measure: "kg".to_string(),
            quantity_offered: None,
            moq: None,
            lead_time_days: None,
            incoterm: None,
        };
        match price {
            Some(p) => NormalizedQuote {
                normalized_unit_price: Some(p),
                normalized_total: Some(p),
                currency_converted: false,
                uom_converted: false,
                incoterm_adjusted: false,
                exchange_rate_used: Some(Decimal::ONE),
                lead_time_score: None,
                moq_warning: None,
                details: None,
                error: None,
                quote,
            },
            None => NormalizedQuote::failed(quote, "Unsupported currency: XYZ"),
        }
    }

    #[test]
    fn test_rank_ascending_and_contiguous() {
        let records = vec![
            make_record("a", Some(dec!(10.0))),
            make_record("b", Some(dec!(5.0))),
            make_record("c", Some(dec!(7.5))),
        ];
        let ranking = rank_quotes(&records);
        assert_eq!(ranking.len(), 3);
        assert_eq!(ranking[0].supplier_id, "b");
        assert_eq!(ranking[0].rank, 1);
        assert_eq!(ranking[1].supplier_id, "c");
        assert_eq!(ranking[1].rank, 2);
        assert_eq!(ranking[2].supplier_id, "a");
        assert_eq!(ranking[2].rank, 3);
    }

    #[test]
    fn test_failed_records_excluded() {
        let records = vec![
            make_record("a", Some(dec!(10.0))),
            make_record("b", None),
        ];
        let ranking = rank_quotes(&records);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].supplier_id, "a");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![
            make_record("first", Some(dec!(5.0))),
            make_record("second", Some(dec!(5.0))),
            make_record("third", Some(dec!(5.0))),
        ];
        let ranking = rank_quotes(&records);
        assert_eq!(ranking[0].supplier_id, "first");
        assert_eq!(ranking[1].supplier_id, "second");
        assert_eq!(ranking[2].supplier_id, "third");
    }

    #[test]
    fn test_savings_message() {
        let records = vec![
            make_record("a", Some(dec!(10.0))),
            make_record("b", Some(dec!(5.0))),
        ];
        let ranking = rank_quotes(&records);
        let message = savings_message(&ranking).unwrap();
        assert_eq!(
            message,
            "Potential savings: 50.0% between lowest and highest quote."
        );
    }

    #[test]
    fn test_no_savings_message_for_single_entry() {
        let records = vec![make_record("a", Some(dec!(10.0)))];
        let ranking = rank_quotes(&records);
        assert!(savings_message(&ranking).is_none());
    }

    #[test]
    fn test_no_savings_message_for_zero_prices() {
        let records = vec![
            make_record("a", Some(dec!(0))),
            make_record("b", Some(dec!(0))),
        ];
        let ranking = rank_quotes(&records);
        assert!(savings_message(&ranking).is_none());
    }
}
