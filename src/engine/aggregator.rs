//! Spending aggregation
//!
//! Turns a user's debit transactions over a range into a [`StatsResult`]:
//! total spend, spend per category, and the average per day.

use crate::models::{DateRange, StatsResult, Transaction};

use super::grouping::{group_spend, total_spend};

/// Stateless spending aggregator
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator;

impl Aggregator {
    pub fn new() -> Self {
        Self
    }

    /// Summarize `transactions` over `range`.
    ///
    /// The input is expected to be the store's debit query result; credits
    /// that slip through contribute nothing. The daily average divides the
    /// unrounded total by `range.day_divisor()` before rounding, so a
    /// sub-day range counts as one day.
    pub fn summarize(&self, transactions: &[Transaction], range: &DateRange) -> StatsResult {
        if transactions.is_empty() {
            return StatsResult::empty();
        }

        let total = total_spend(transactions);
        let by_category = group_spend(transactions, |t| t.category_label().to_string())
            .into_iter()
            .map(|(label, spent)| (label, spent.round_cents()))
            .collect();
        let daily_average = total / range.day_divisor();

        StatsResult {
            total_spent: total.round_cents(),
            by_category,
            daily_average: daily_average.round_cents(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, UserId};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap()
    }

    fn debit(id: &str, amount: rust_decimal::Decimal, category: Option<&str>) -> Transaction {
        let mut t = Transaction::new(id, UserId::new(1), Money::from_decimal(amount), start());
        t.category = category.map(str::to_string);
        t
    }

    fn range_of_days(days: i64) -> DateRange {
        DateRange::new(start(), start() + Duration::days(days)).unwrap()
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let stats = Aggregator::new().summarize(&[], &range_of_days(5));
        assert_eq!(stats, StatsResult::empty());
        assert!(stats.by_category.is_empty());
    }

    #[test]
    fn test_reference_example() {
        let txns = vec![
            debit("a", dec!(-20), Some("food")),
            debit("b", dec!(-30), Some("food")),
            debit("c", dec!(-10), None),
        ];

        let stats = Aggregator::new().summarize(&txns, &range_of_days(2));

        assert_eq!(stats.total_spent.amount(), dec!(60.00));
        assert_eq!(stats.by_category.len(), 2);
        assert_eq!(stats.by_category["food"].amount(), dec!(50.00));
        assert_eq!(stats.by_category["Other"].amount(), dec!(10.00));
        assert_eq!(stats.daily_average.amount(), dec!(30.00));
    }

    #[test]
    fn test_same_instant_range_divides_by_one() {
        let txns = vec![debit("a", dec!(-42.42), Some("fuel"))];
        let stats = Aggregator::new().summarize(&txns, &range_of_days(0));
        assert_eq!(stats.daily_average, stats.total_spent);
    }

    #[test]
    fn test_sub_day_range_divides_by_one() {
        let range = DateRange::new(start(), start() + Duration::hours(23)).unwrap();
        let txns = vec![debit("a", dec!(-90), None)];
        let stats = Aggregator::new().summarize(&txns, &range);
        assert_eq!(stats.daily_average.amount(), dec!(90));
    }

    #[test]
    fn test_empty_category_folds_into_other() {
        let txns = vec![debit("a", dec!(-1), Some("")), debit("b", dec!(-2), None)];
        let stats = Aggregator::new().summarize(&txns, &range_of_days(1));
        assert_eq!(stats.by_category.keys().collect::<Vec<_>>(), vec!["Other"]);
        assert_eq!(stats.by_category["Other"].amount(), dec!(3));
    }

    #[test]
    fn test_average_rounds_half_up() {
        // 0.25 / 2 = 0.125 -> 0.13
        let txns = vec![debit("a", dec!(-0.25), None)];
        let stats = Aggregator::new().summarize(&txns, &range_of_days(2));
        assert_eq!(stats.daily_average.amount(), dec!(0.13));

        // 100 / 3 = 33.333.. -> 33.33
        let txns = vec![debit("b", dec!(-100), None)];
        let stats = Aggregator::new().summarize(&txns, &range_of_days(3));
        assert_eq!(stats.daily_average.amount(), dec!(33.33));
    }

    #[test]
    fn test_total_matches_category_sum() {
        let txns = vec![
            debit("a", dec!(-10.005), Some("a")),
            debit("b", dec!(-0.333), Some("b")),
            debit("c", dec!(-7.777), Some("c")),
            debit("d", dec!(-1.111), None),
        ];
        let stats = Aggregator::new().summarize(&txns, &range_of_days(4));

        let category_sum: Money = stats.by_category.values().copied().sum();
        let drift = (stats.total_spent - category_sum).abs();
        // one half-cent of rounding per category at most
        assert!(drift.amount() <= dec!(0.005) * rust_decimal::Decimal::from(stats.by_category.len()));
        assert!(stats.by_category.values().all(|v| !v.is_negative()));
    }

    #[test]
    fn test_credits_are_ignored() {
        let txns = vec![debit("a", dec!(-10), None), debit("b", dec!(500), Some("salary"))];
        let stats = Aggregator::new().summarize(&txns, &range_of_days(1));
        assert_eq!(stats.total_spent.amount(), dec!(10));
        assert!(!stats.by_category.contains_key("salary"));
    }
}
