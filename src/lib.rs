//! SpendWatch - per-user spending statistics with overspend warnings
//!
//! This library imports financial transactions into a local JSON store and
//! answers spending queries over them: total spend, spend per category and
//! average daily spend for a user and time range. Every query also checks the
//! user's spending against a daily and a rolling seven-day limit and reports
//! overspends through pluggable warning sinks.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, users, ranges, warnings)
//! - `storage`: JSON file storage layer and the store traits
//! - `engine`: Aggregator, limit monitor and warning sinks
//! - `services`: Query, import and lookup logic
//! - `reports`: Table, JSON, YAML and CSV rendering
//! - `cli`: Command handlers for the `spendwatch` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use spendwatch::config::{paths::SpendPaths, settings::Settings};
//! use spendwatch::engine::LogWarningSink;
//! use spendwatch::models::{DateRange, UserId};
//! use spendwatch::services::{StatsQuery, StatsService};
//! use spendwatch::storage::Storage;
//!
//! let paths = SpendPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let service = StatsService::from_storage(&storage, &LogWarningSink, settings.limit_config());
//! let range = DateRange::parse("2025-01-01", "2025-01-31")?;
//! let report = service.stats(&StatsQuery::new(UserId::new(1), range))?;
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SpendError, SpendResult};
