//! Spending summary value object

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::money::Money;

/// Spending summary over a date range, every figure rounded to cents
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsResult {
    /// Total absolute spend
    pub total_spent: Money,
    /// Spend per category label; only categories with activity appear
    pub by_category: BTreeMap<String, Money>,
    /// `total_spent` spread over the range's day divisor
    pub daily_average: Money,
}

impl StatsResult {
    /// The result for a range with no spending
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.total_spent.is_zero() && self.by_category.is_empty()
    }

    /// Categories ordered by spend, largest first
    pub fn top_categories(&self, limit: usize) -> Vec<(&str, Money)> {
        let mut entries: Vec<_> = self
            .by_category
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        entries.into_iter().take(limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_serializes_to_zeroes() {
        let json = serde_json::to_value(StatsResult::empty()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"total_spent": 0.0, "by_category": {}, "daily_average": 0.0})
        );
    }

    #[test]
    fn test_top_categories() {
        let mut stats = StatsResult::empty();
        stats.by_category.insert("food".into(), Money::from_cents(5000));
        stats.by_category.insert("rent".into(), Money::from_cents(90000));
        stats.by_category.insert("Other".into(), Money::from_cents(1000));

        let top = stats.top_categories(2);
        assert_eq!(top, vec![("rent", Money::from_cents(90000)), ("food", Money::from_cents(5000))]);
    }
}
