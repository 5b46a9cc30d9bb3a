//! Grouped summation shared by the aggregator and the limit monitor

use std::collections::BTreeMap;

use crate::models::{Money, Transaction};

/// Sum the absolute spend of `transactions` per key.
///
/// Only keys seen at least once appear in the result; the map is ordered so
/// output does not depend on input order.
pub fn group_spend<'a, K, F, I>(transactions: I, key: F) -> BTreeMap<K, Money>
where
    I: IntoIterator<Item = &'a Transaction>,
    F: Fn(&Transaction) -> K,
    K: Ord,
{
    let mut groups = BTreeMap::new();
    for txn in transactions {
        if !txn.is_debit() {
            continue;
        }
        *groups.entry(key(txn)).or_insert_with(Money::zero) += txn.spent();
    }
    groups
}

/// Total absolute spend
pub fn total_spend<'a, I>(transactions: I) -> Money
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions.into_iter().map(Transaction::spent).sum()
}
