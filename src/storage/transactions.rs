//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json and serves
//! the debit queries the spending engine runs.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::SpendError;
use crate::models::{DateRange, Transaction, TransactionId, UserId};

use super::file_io::{read_json, remove_if_exists, write_json_atomic};
use super::TransactionStore;

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with a per-user index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: user_id -> transaction_ids
    by_user: RwLock<HashMap<UserId, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the index
    pub fn load(&self) -> Result<(), SpendError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_user = self.by_user.write().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_user.clear();

        for txn in file_data.transactions {
            txn.validate().map_err(|e| {
                SpendError::StoreUnavailable(format!("{}: {}", self.path.display(), e))
            })?;
            by_user.entry(txn.user_id).or_default().push(txn.id.clone());
            data.insert(txn.id.clone(), txn);
        }

        debug!(count = data.len(), path = %self.path.display(), "loaded transactions");
        Ok(())
    }

    /// Save transactions to disk, oldest first
    pub fn save(&self) -> Result<(), SpendError> {
        let data = self.data.read().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));

        let file_data = TransactionData { transactions };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: &TransactionId) -> Result<Option<Transaction>, SpendError> {
        let data = self.data.read().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(id).cloned())
    }

    /// Check whether an ID is already stored
    pub fn contains(&self, id: &TransactionId) -> Result<bool, SpendError> {
        let data = self.data.read().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.contains_key(id))
    }

    /// All transactions of a user, newest first
    pub fn get_by_user(&self, user_id: UserId) -> Result<Vec<Transaction>, SpendError> {
        let data = self.data.read().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_user = self.by_user.read().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        let ids = by_user.get(&user_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(transactions)
    }

    /// Insert a new transaction; transactions are never replaced
    pub fn insert(&self, txn: Transaction) -> Result<(), SpendError> {
        txn.validate()?;

        let mut data = self.data.write().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_user = self.by_user.write().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;

        if data.contains_key(&txn.id) {
            return Err(SpendError::duplicate_transaction(txn.id.as_str()));
        }

        by_user.entry(txn.user_id).or_default().push(txn.id.clone());
        data.insert(txn.id.clone(), txn);
        Ok(())
    }

    /// Drop every transaction, in memory and on disk
    pub fn clear(&self) -> Result<usize, SpendError> {
        let mut data = self.data.write().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_user = self.by_user.write().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;

        let removed = data.len();
        data.clear();
        by_user.clear();
        remove_if_exists(&self.path)?;
        Ok(removed)
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, SpendError> {
        let data = self.data.read().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

impl TransactionStore for TransactionRepository {
    fn query_debits(
        &self,
        user_id: UserId,
        range: &DateRange,
        category: Option<&str>,
    ) -> Result<Vec<Transaction>, SpendError> {
        let data = self.data.read().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_user = self.by_user.read().map_err(|e| {
            SpendError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;

        let ids = by_user.get(&user_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let matches: Vec<_> = ids
            .iter()
            .filter_map(|id| data.get(id))
            .filter(|t| t.matches_debit_query(user_id, range, category))
            .cloned()
            .collect();

        debug!(
            user_id = %user_id,
            range = %range,
            category = ?category,
            matched = matches.len(),
            "debit query"
        );
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::{DateTime, TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, 12, 0, 0).unwrap()
    }

    fn txn(id: &str, user: i64, cents: i64, day: u32) -> Transaction {
        Transaction::new(id, UserId::new(user), Money::from_cents(cents), at(day))
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(txn("t1", 1, -5000, 15)).unwrap();

        let retrieved = repo.get(&TransactionId::new("t1")).unwrap().unwrap();
        assert_eq!(retrieved.amount, Money::from_cents(-5000));
        assert!(repo.contains(&TransactionId::new("t1")).unwrap());
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(txn("t1", 1, -5000, 15)).unwrap();

        let err = repo.insert(txn("t1", 2, -1, 16)).unwrap_err();
        assert!(matches!(err, SpendError::Duplicate { .. }));
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_oversized_amounts_never_enter_the_store() {
        let (temp_dir, repo) = create_test_repo();
        let huge = Money::parse("-70000000000000000000000000000").unwrap();

        let err = repo
            .insert(Transaction::new("big", UserId::new(1), huge, at(3)))
            .unwrap_err();
        assert!(matches!(err, SpendError::Validation(_)));
        assert_eq!(repo.count().unwrap(), 0);

        std::fs::write(
            temp_dir.path().join("transactions.json"),
            r#"{"transactions": [
                {"id": "big", "user_id": 1, "amount": -7e28, "category": null, "timestamp": "2025-01-03T12:00:00Z"}
            ]}"#,
        )
        .unwrap();
        assert!(repo.load().unwrap_err().is_retryable());
    }

    #[test]
    fn test_get_by_user() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(txn("a", 1, -100, 10)).unwrap();
        repo.insert(txn("b", 1, -200, 12)).unwrap();
        repo.insert(txn("c", 2, -300, 11)).unwrap();

        let user1 = repo.get_by_user(UserId::new(1)).unwrap();
        assert_eq!(user1.len(), 2);
        assert_eq!(user1[0].id.as_str(), "b");
        assert_eq!(repo.get_by_user(UserId::new(3)).unwrap().len(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.insert(txn("t1", 1, -5000, 15).with_category("food")).unwrap();
        repo.save().unwrap();

        let repo2 = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        let reloaded = repo2.get(&TransactionId::new("t1")).unwrap().unwrap();
        assert_eq!(reloaded.category.as_deref(), Some("food"));
        assert_eq!(repo2.get_by_user(UserId::new(1)).unwrap().len(), 1);
    }

    #[test]
    fn test_query_debits_filters() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(txn("in-range", 1, -100, 12).with_category("food")).unwrap();
        repo.insert(txn("other-cat", 1, -100, 13).with_category("travel")).unwrap();
        repo.insert(txn("credit", 1, 900, 13)).unwrap();
        repo.insert(txn("too-late", 1, -100, 20)).unwrap();
        repo.insert(txn("other-user", 2, -100, 12)).unwrap();

        let range = DateRange::new(at(10), at(15)).unwrap();

        let all = repo.query_debits(UserId::new(1), &range, None).unwrap();
        let mut ids: Vec<_> = all.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["in-range", "other-cat"]);

        let food = repo.query_debits(UserId::new(1), &range, Some("food")).unwrap();
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].id.as_str(), "in-range");
    }

    #[test]
    fn test_clear_removes_file() {
        let (temp_dir, repo) = create_test_repo();
        repo.insert(txn("t1", 1, -5000, 15)).unwrap();
        repo.save().unwrap();

        assert_eq!(repo.clear().unwrap(), 1);
        assert_eq!(repo.count().unwrap(), 0);
        assert!(!temp_dir.path().join("transactions.json").exists());
    }
}
