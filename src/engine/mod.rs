//! Spending engine
//!
//! Pure computations over transactions fetched from a
//! [`TransactionStore`](crate::storage::TransactionStore):
//!
//! - [`Aggregator`]: total, per-category and per-day spending
//! - [`LimitMonitor`]: daily and rolling-weekly limit warnings, reported
//!   through a [`WarningSink`]
//!
//! Neither component holds state or depends on the other.

pub mod aggregator;
pub mod grouping;
pub mod limits;
pub mod sink;

pub use aggregator::Aggregator;
pub use grouping::{group_spend, total_spend};
pub use limits::{LimitConfig, LimitMonitor};
pub use sink::{
    CollectingWarningSink, FanoutWarningSink, JsonlWarningSink, LogWarningSink, NoOpWarningSink,
    WarningRecord, WarningSink,
};
