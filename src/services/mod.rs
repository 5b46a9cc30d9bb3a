//! Service layer for spendwatch
//!
//! Services sit between the CLI and the storage layer. They validate input,
//! resolve users, and drive the spending engine.

pub mod import;
pub mod stats;
pub mod user;

pub use import::{ImportFormat, ImportResult, ImportService, TransactionRecord};
pub use stats::{StatsQuery, StatsReport, StatsService};
pub use user::UserService;
