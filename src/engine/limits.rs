//! Spending limit monitor
//!
//! Two independent checks over two different windows:
//!
//! - **Daily**: debits in the requested `[from, to]` are summed per UTC
//!   calendar day; each day strictly over the daily limit yields a warning.
//! - **Weekly**: debits in the seven days ending at `to` are summed; a total
//!   strictly over the weekly limit yields one warning. This window ignores
//!   `from` entirely, so it can reach before the requested range or cover
//!   only its tail.
//!
//! Both checks always see every category, whatever filter the stats query
//! used.

use tracing::{debug, warn};

use crate::error::SpendResult;
use crate::models::{DateRange, LimitWarning, Money, Transaction, UserId};
use crate::storage::TransactionStore;

use super::grouping::{group_spend, total_spend};
use super::sink::WarningSink;

/// Limit thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitConfig {
    daily_limit: Money,
    weekly_limit: Money,
}

impl LimitConfig {
    pub fn new(daily_limit: Money, weekly_limit: Money) -> Self {
        Self {
            daily_limit,
            weekly_limit,
        }
    }

    pub fn daily_limit(&self) -> Money {
        self.daily_limit
    }

    pub fn weekly_limit(&self) -> Money {
        self.weekly_limit
    }

    pub fn with_daily_limit(mut self, limit: Money) -> Self {
        self.daily_limit = limit;
        self
    }

    pub fn with_weekly_limit(mut self, limit: Money) -> Self {
        self.weekly_limit = limit;
        self
    }
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self::new(Money::from_cents(100_000), Money::from_cents(500_000))
    }
}

/// Evaluates daily and rolling-weekly limits
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitMonitor {
    config: LimitConfig,
}

impl LimitMonitor {
    pub fn new(config: LimitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LimitConfig {
        &self.config
    }

    /// Daily warnings for an already-fetched debit set, ordered by day
    pub fn check_daily(&self, user_id: UserId, transactions: &[Transaction]) -> Vec<LimitWarning> {
        group_spend(transactions, Transaction::day)
            .into_iter()
            .filter(|(_, spent)| *spent > self.config.daily_limit)
            .map(|(day, spent)| {
                LimitWarning::daily(user_id, day, spent.round_cents(), self.config.daily_limit)
            })
            .collect()
    }

    /// Weekly warning for the debits of `week`, if over the limit
    pub fn check_weekly(
        &self,
        user_id: UserId,
        week: &DateRange,
        transactions: &[Transaction],
    ) -> Option<LimitWarning> {
        let spent = total_spend(transactions);
        if spent <= self.config.weekly_limit {
            return None;
        }

        let (start, end) = week.dates();
        Some(LimitWarning::weekly(
            user_id,
            start,
            end,
            spent.round_cents(),
            self.config.weekly_limit,
        ))
    }

    /// Fetch both windows from `store`, run both checks, and report every
    /// warning to `sink`. Returns the warnings, daily ones first.
    pub fn evaluate(
        &self,
        store: &dyn TransactionStore,
        user_id: UserId,
        range: &DateRange,
        sink: &dyn WarningSink,
    ) -> SpendResult<Vec<LimitWarning>> {
        let in_range = store.query_debits(user_id, range, None)?;
        let mut warnings = self.check_daily(user_id, &in_range);

        let week = range.trailing_week();
        let in_week = store.query_debits(user_id, &week, None)?;
        warnings.extend(self.check_weekly(user_id, &week, &in_week));

        debug!(
            user_id = %user_id,
            range_debits = in_range.len(),
            week_debits = in_week.len(),
            warnings = warnings.len(),
            "limit check"
        );

        sink.record_all(&warnings);
        Ok(warnings)
    }

    /// [`evaluate`](Self::evaluate) that never fails: a store error is
    /// logged and yields no warnings.
    pub fn evaluate_best_effort(
        &self,
        store: &dyn TransactionStore,
        user_id: UserId,
        range: &DateRange,
        sink: &dyn WarningSink,
    ) -> Vec<LimitWarning> {
        match self.evaluate(store, user_id, range, sink) {
            Ok(warnings) => warnings,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "limit check skipped");
                Vec::new()
            }
        }
    }
}
