//! Snapshot aggregation: partition a flat quote list into movers.
//!
//! Used when the provider has no top-movers endpoint. Pure and
//! deterministic: the same input list always yields the same snapshot.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::model::{MarketSnapshot, Stock};

/// Each movers list is truncated to this many entries.
const TOP_N: usize = 10;

/// Partition quotes into gainers, losers and most active.
///
/// - gainers: percent change > 0, sorted descending
/// - losers: percent change < 0, sorted ascending (worst first)
/// - most active: everything, sorted by absolute percent change descending
///
/// Sorts are stable, so quotes with equal percent change keep their input
/// order.
pub fn partition_snapshot(quotes: Vec<Stock>, fetched_at: DateTime<Utc>) -> MarketSnapshot {
    let mut gainers: Vec<Stock> = quotes
        .iter()
        .filter(|s| s.percent_change > Decimal::ZERO)
        .cloned()
        .collect();
    gainers.sort_by(|a, b| b.percent_change.cmp(&a.percent_change));
    gainers.truncate(TOP_N);

    let mut losers: Vec<Stock> = quotes
        .iter()
        .filter(|s| s.percent_change < Decimal::ZERO)
        .cloned()
        .collect();
    losers.sort_by(|a, b| a.percent_change.cmp(&b.percent_change));
    losers.truncate(TOP_N);

    let mut most_active = quotes;
    most_active.sort_by(|a, b| b.percent_change.abs().cmp(&a.percent_change.abs()));
    most_active.truncate(TOP_N);

    MarketSnapshot {
        gainers,
        losers,
        most_active,
        fetched_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn stock(symbol: &str, pct: Decimal) -> Stock {
        Stock {
            symbol: symbol.to_string(),
            company_name: symbol.to_string(),
            current_price: dec!(100),
            price_change: pct,
            percent_change: pct,
            volume: 0,
            day_high: dec!(0),
            day_low: dec!(0),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn gainers_are_positive_and_descending() {
        let quotes = vec![
            stock("A", dec!(1.5)),
            stock("B", dec!(-2.0)),
            stock("C", dec!(3.0)),
            stock("D", dec!(0)),
        ];
        let snapshot = partition_snapshot(quotes, Utc::now());

        let symbols: Vec<&str> = snapshot.gainers.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["C", "A"]);
        for pair in snapshot.gainers.windows(2) {
            assert!(pair[0].percent_change >= pair[1].percent_change);
        }
    }

    #[test]
    fn losers_are_negative_and_ascending() {
        let quotes = vec![
            stock("A", dec!(-1.5)),
            stock("B", dec!(2.0)),
            stock("C", dec!(-3.0)),
        ];
        let snapshot = partition_snapshot(quotes, Utc::now());

        let symbols: Vec<&str> = snapshot.losers.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["C", "A"]);
    }

    #[test]
    fn zero_change_appears_only_in_most_active() {
        let quotes = vec![stock("A", dec!(0))];
        let snapshot = partition_snapshot(quotes, Utc::now());
        assert!(snapshot.gainers.is_empty());
        assert!(snapshot.losers.is_empty());
        assert_eq!(snapshot.most_active.len(), 1);
    }

    #[test]
    fn most_active_orders_by_absolute_change() {
        let quotes = vec![
            stock("A", dec!(1.0)),
            stock("B", dec!(-5.0)),
            stock("C", dec!(2.0)),
        ];
        let snapshot = partition_snapshot(quotes, Utc::now());
        let symbols: Vec<&str> = snapshot
            .most_active
            .iter()
            .map(|s| s.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["B", "C", "A"]);
    }

    #[test]
    fn lists_truncate_to_ten() {
        let quotes: Vec<Stock> = (0..15)
            .map(|i| stock(&format!("S{}", i), Decimal::from(i + 1)))
            .collect();
        let snapshot = partition_snapshot(quotes, Utc::now());
        assert_eq!(snapshot.gainers.len(), 10);
        assert_eq!(snapshot.most_active.len(), 10);
    }

    #[test]
    fn equal_changes_keep_input_order() {
        let quotes = vec![
            stock("FIRST", dec!(1.0)),
            stock("SECOND", dec!(1.0)),
        ];
        let snapshot = partition_snapshot(quotes, Utc::now());
        let symbols: Vec<&str> = snapshot.gainers.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["FIRST", "SECOND"]);
    }
}
