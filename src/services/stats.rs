//! Stats service
//!
//! The request boundary for spending queries: resolves the user, runs the
//! limit monitor as a side channel, then aggregates the (optionally
//! category-filtered) debits.

use serde::Serialize;
use tracing::debug;

use crate::engine::{Aggregator, LimitConfig, LimitMonitor, WarningSink};
use crate::error::{SpendError, SpendResult};
use crate::models::{DateRange, LimitWarning, StatsResult, UserId};
use crate::storage::{Storage, TransactionStore, UserDirectory};

/// A spending query
#[derive(Debug, Clone, PartialEq)]
pub struct StatsQuery {
    pub user_id: UserId,
    pub range: DateRange,
    pub category: Option<String>,
}

impl StatsQuery {
    pub fn new(user_id: UserId, range: DateRange) -> Self {
        Self {
            user_id,
            range,
            category: None,
        }
    }

    /// Restrict the aggregation to one category (exact match); empty means
    /// no filter
    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.is_empty() {
            None
        } else {
            Some(category)
        };
        self
    }
}

/// Stats plus the warnings raised while computing them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub user_id: UserId,
    pub range: DateRange,
    pub category: Option<String>,
    pub stats: StatsResult,
    /// Delivered through the sink as well; not part of the stats payload
    #[serde(skip)]
    pub warnings: Vec<LimitWarning>,
}

/// Service for spending statistics
pub struct StatsService<'a> {
    transactions: &'a dyn TransactionStore,
    users: &'a dyn UserDirectory,
    sink: &'a dyn WarningSink,
    aggregator: Aggregator,
    monitor: LimitMonitor,
}

impl<'a> StatsService<'a> {
    /// Create a stats service over explicit collaborators
    pub fn new(
        transactions: &'a dyn TransactionStore,
        users: &'a dyn UserDirectory,
        sink: &'a dyn WarningSink,
        limits: LimitConfig,
    ) -> Self {
        Self {
            transactions,
            users,
            sink,
            aggregator: Aggregator::new(),
            monitor: LimitMonitor::new(limits),
        }
    }

    /// Create a stats service backed by the JSON repositories
    pub fn from_storage(storage: &'a Storage, sink: &'a dyn WarningSink, limits: LimitConfig) -> Self {
        Self::new(&storage.transactions, &storage.users, sink, limits)
    }

    /// Run a spending query.
    ///
    /// # Errors
    ///
    /// `UnknownUser` if the user does not exist; `StoreUnavailable` if the
    /// aggregation read fails. A failing limit check is logged and skipped.
    pub fn stats(&self, query: &StatsQuery) -> SpendResult<StatsReport> {
        self.users
            .find_user(query.user_id)?
            .ok_or(SpendError::UnknownUser(query.user_id))?;

        let warnings = self.monitor.evaluate_best_effort(
            self.transactions,
            query.user_id,
            &query.range,
            self.sink,
        );

        let category = query.category.as_deref().filter(|c| !c.is_empty());
        let debits = self
            .transactions
            .query_debits(query.user_id, &query.range, category)?;
        let stats = self.aggregator.summarize(&debits, &query.range);

        debug!(
            user_id = %query.user_id,
            debits = debits.len(),
            total = %stats.total_spent,
            "stats computed"
        );

        Ok(StatsReport {
            user_id: query.user_id,
            range: query.range,
            category: category.map(str::to_string),
            stats,
            warnings,
        })
    }
}
