//! User service
//!
//! Lookup of users created by imports.

use crate::error::{SpendError, SpendResult};
use crate::models::{User, UserId};
use crate::storage::Storage;

/// Service for user lookup
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    /// Create a new user service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Get a user by ID, failing with `UnknownUser` if absent
    pub fn get(&self, id: UserId) -> SpendResult<User> {
        self.storage
            .users
            .get(id)?
            .ok_or(SpendError::UnknownUser(id))
    }

    /// List all users ordered by ID
    pub fn list(&self) -> SpendResult<Vec<User>> {
        self.storage.users.get_all()
    }

    /// Number of stored transactions for a user
    pub fn transaction_count(&self, id: UserId) -> SpendResult<usize> {
        Ok(self.storage.transactions.get_by_user(id)?.len())
    }
}
