//! Core data models for SpendWatch
//!
//! This module contains the data structures of the spending domain:
//! users, transactions, query ranges, and the summary and warning values
//! produced by the engine.

pub mod ids;
pub mod money;
pub mod range;
pub mod stats;
pub mod transaction;
pub mod user;
pub mod warning;

pub use ids::{TransactionId, UserId};
pub use money::Money;
pub use range::{parse_timestamp, DateRange};
pub use stats::StatsResult;
pub use transaction::{Transaction, UNCATEGORIZED_LABEL};
pub use user::User;
pub use warning::{LimitScope, LimitWarning, LimitWindow};
