//! Storage layer for SpendWatch
//!
//! Provides JSON file storage with atomic writes and the two read traits the
//! spending engine depends on: [`TransactionStore`] and [`UserDirectory`].

pub mod file_io;
pub mod transactions;
pub mod users;

pub use file_io::{read_json, write_json_atomic};
pub use transactions::TransactionRepository;
pub use users::UserRepository;

use tracing::info;

use crate::config::paths::SpendPaths;
use crate::error::SpendError;
use crate::models::{DateRange, Transaction, User, UserId};

/// Read access to stored transactions.
///
/// Implementations return every transaction of `user_id` whose timestamp is
/// inside `range` (both ends inclusive), whose amount is negative, and, when
/// `category` is given, whose category equals it exactly. Result order is
/// unspecified. Reads should see a stable snapshot as of the call.
pub trait TransactionStore: Send + Sync {
    fn query_debits(
        &self,
        user_id: UserId,
        range: &DateRange,
        category: Option<&str>,
    ) -> Result<Vec<Transaction>, SpendError>;
}

/// Lookup of known users
pub trait UserDirectory: Send + Sync {
    fn find_user(&self, id: UserId) -> Result<Option<User>, SpendError>;
}

/// Counts from a full data reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetSummary {
    pub transactions_removed: usize,
    pub users_removed: usize,
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SpendPaths,
    pub transactions: TransactionRepository,
    pub users: UserRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: SpendPaths) -> Result<Self, SpendError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            users: UserRepository::new(paths.users_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &SpendPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), SpendError> {
        self.transactions.load()?;
        self.users.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SpendError> {
        self.transactions.save()?;
        self.users.save()?;
        Ok(())
    }

    /// True when no transaction has been imported yet
    pub fn is_empty(&self) -> Result<bool, SpendError> {
        Ok(self.transactions.count()? == 0)
    }

    /// Delete every transaction and user
    pub fn reset(&self) -> Result<ResetSummary, SpendError> {
        let summary = ResetSummary {
            transactions_removed: self.transactions.clear()?,
            users_removed: self.users.clear()?,
        };
        info!(
            transactions = summary.transactions_removed,
            users = summary.users_removed,
            "data reset"
        );
        Ok(summary)
    }
}
