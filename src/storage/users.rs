//! User repository for JSON storage
//!
//! Manages loading and saving users to users.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendError;
use crate::models::{User, UserId};

use super::file_io::{read_json, remove_if_exists, write_json_atomic};
use super::UserDirectory;

/// Serializable user data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, User>>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> Result<(), SpendError> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for user in file_data.users {
            data.insert(user.id, user);
        }

        Ok(())
    }

    /// Save users to disk
    pub fn save(&self) -> Result<(), SpendError> {
        let data = self.data.read().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by_key(|u| u.id);

        write_json_atomic(&self.path, &UserData { users })
    }

    /// Get a user by ID
    pub fn get(&self, id: UserId) -> Result<Option<User>, SpendError> {
        let data = self.data.read().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all users ordered by ID
    pub fn get_all(&self) -> Result<Vec<User>, SpendError> {
        let data = self.data.read().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    /// Insert or update a user
    pub fn upsert(&self, user: User) -> Result<(), SpendError> {
        let mut data = self.data.write().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(user.id, user);
        Ok(())
    }

    /// Insert a placeholder user unless the ID is already known.
    ///
    /// Returns true when a user was created.
    pub fn ensure(&self, id: UserId) -> Result<bool, SpendError> {
        let mut data = self.data.write().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;

        if data.contains_key(&id) {
            return Ok(false);
        }
        data.insert(id, User::placeholder(id));
        Ok(true)
    }

    /// Drop every user, in memory and on disk
    pub fn clear(&self) -> Result<usize, SpendError> {
        let mut data = self.data.write().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;

        let removed = data.len();
        data.clear();
        remove_if_exists(&self.path)?;
        Ok(removed)
    }

    /// Count users
    pub fn count(&self) -> Result<usize, SpendError> {
        let data = self.data.read().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

impl UserDirectory for UserRepository {
    fn find_user(&self, id: UserId) -> Result<Option<User>, SpendError> {
        self.get(id)
    }
}
