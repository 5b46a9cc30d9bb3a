//! Import service
//!
//! Loads transaction batches from JSON or CSV files into storage. Unknown
//! user ids get a placeholder user; ids already stored are skipped.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SpendError, SpendResult};
use crate::models::{parse_timestamp, Money, Transaction, TransactionId, UserId};
use crate::storage::Storage;

/// One transaction as it appears in an import file.
///
/// CSV files use the same names as header columns:
/// `id,user_id,amount,currency,category,timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub user_id: i64,
    pub amount: Money,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub category: Option<String>,
    pub timestamp: String,
}

impl TransactionRecord {
    /// Validate and convert into a stored transaction
    pub fn to_transaction(&self) -> SpendResult<Transaction> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(SpendError::Validation("Transaction id cannot be empty".into()));
        }

        let timestamp = parse_timestamp(&self.timestamp)?;
        let category = self.category.clone().filter(|c| !c.is_empty());

        let txn = Transaction {
            id: TransactionId::new(id),
            user_id: UserId::new(self.user_id),
            amount: self.amount,
            currency: self.currency.trim().to_string(),
            category,
            timestamp,
        };
        txn.validate()?;
        Ok(txn)
    }
}

/// Supported import file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Csv,
}

impl ImportFormat {
    /// Pick the format from the file extension; anything but .csv is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Result of an import operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    /// Number of transactions stored
    pub imported: usize,
    /// Number skipped because their id was already stored
    pub duplicates_skipped: usize,
    /// Number of placeholder users created
    pub users_created: usize,
    /// Number of records rejected
    pub errors: usize,
    /// (record index, message) for each rejected record
    pub error_messages: Vec<(usize, String)>,
}

/// Service for importing transaction batches
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse a JSON array of records
    pub fn parse_json(&self, content: &str) -> SpendResult<Vec<TransactionRecord>> {
        serde_json::from_str(content)
            .map_err(|e| SpendError::Import(format!("Invalid JSON transaction list: {}", e)))
    }

    /// Parse CSV with a header row
    pub fn parse_csv(&self, content: &str) -> SpendResult<Vec<TransactionRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        reader
            .deserialize()
            .enumerate()
            .map(|(row, record)| {
                record.map_err(|e| SpendError::Import(format!("CSV row {}: {}", row + 1, e)))
            })
            .collect()
    }

    /// Read and parse a file, choosing the format from its extension
    pub fn parse_file(&self, path: &Path) -> SpendResult<Vec<TransactionRecord>> {
        if !path.exists() {
            return Err(SpendError::Import(format!("File not found: {}", path.display())));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| SpendError::Import(format!("Failed to read {}: {}", path.display(), e)))?;

        match ImportFormat::from_path(path) {
            ImportFormat::Json => self.parse_json(&content),
            ImportFormat::Csv => self.parse_csv(&content),
        }
    }

    /// Store parsed records and persist both repositories
    pub fn import_records(&self, records: &[TransactionRecord]) -> SpendResult<ImportResult> {
        let mut result = ImportResult::default();

        for (index, record) in records.iter().enumerate() {
            let txn = match record.to_transaction() {
                Ok(txn) => txn,
                Err(e) => {
                    result.errors += 1;
                    result.error_messages.push((index, e.to_string()));
                    continue;
                }
            };

            if self.storage.users.ensure(txn.user_id)? {
                result.users_created += 1;
            }

            if self.storage.transactions.contains(&txn.id)? {
                debug!(id = %txn.id, "skipping duplicate transaction");
                result.duplicates_skipped += 1;
                continue;
            }

            self.storage.transactions.insert(txn)?;
            result.imported += 1;
        }

        self.storage.save_all()?;

        info!(
            imported = result.imported,
            duplicates = result.duplicates_skipped,
            users_created = result.users_created,
            errors = result.errors,
            "import finished"
        );
        Ok(result)
    }

    /// Parse and import a file
    pub fn import_file(&self, path: &Path) -> SpendResult<ImportResult> {
        let records = self.parse_file(path)?;
        self.import_records(&records)
    }

    /// Import `path` only if the store holds no transactions yet and the
    /// file exists. Returns `None` when nothing was done.
    pub fn seed_if_empty(&self, path: &Path) -> SpendResult<Option<ImportResult>> {
        if !self.storage.is_empty()? || !path.exists() {
            return Ok(None);
        }

        info!(path = %path.display(), "seeding empty store");
        self.import_file(path).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendPaths;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    const SAMPLE_JSON: &str = r#"[
        {"id": "t1", "user_id": 1, "amount": -20.0, "currency": "USD", "category": "food", "timestamp": "2025-01-01T10:00:00"},
        {"id": "t2", "user_id": 1, "amount": -10.5, "currency": "USD", "category": null, "timestamp": "2025-01-02T11:30:00"},
        {"id": "t3", "user_id": 2, "amount": 1500, "currency": "EUR", "category": "salary", "timestamp": "2025-01-03T09:00:00Z"}
    ]"#;

    #[test]
    fn test_parse_json() {
        let (_temp_dir, storage) = create_test_storage();
        let records = ImportService::new(&storage).parse_json(SAMPLE_JSON).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].amount.amount(), dec!(-10.5));
        assert_eq!(records[1].category, None);
    }

    #[test]
    fn test_parse_csv() {
        let (_temp_dir, storage) = create_test_storage();
        let csv_data = "id,user_id,amount,currency,category,timestamp\n\
                        c1,4,-12.34,USD,food,2025-01-01\n\
                        c2,4,-5,USD,,2025-01-02T08:00:00\n";

        let records = ImportService::new(&storage).parse_csv(csv_data).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount.amount(), dec!(-12.34));
        assert_eq!(records[1].category, None);
    }

    #[test]
    fn test_parse_csv_reports_bad_row() {
        let (_temp_dir, storage) = create_test_storage();
        let csv_data = "id,user_id,amount,currency,category,timestamp\n\
                        c1,not-a-number,-1,USD,food,2025-01-01\n";

        let err = ImportService::new(&storage).parse_csv(csv_data).unwrap_err();
        assert!(err.to_string().contains("CSV row 1"));
    }

    #[test]
    fn test_import_creates_users_and_transactions() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);
        let records = service.parse_json(SAMPLE_JSON).unwrap();

        let result = service.import_records(&records).unwrap();
        assert_eq!(result.imported, 3);
        assert_eq!(result.users_created, 2);
        assert_eq!(result.duplicates_skipped, 0);
        assert_eq!(storage.transactions.count().unwrap(), 3);
        assert_eq!(storage.users.get(UserId::new(2)).unwrap().unwrap().name, "User 2");
        assert!(storage.paths().transactions_file().exists());
    }

    #[test]
    fn test_reimport_skips_duplicates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);
        let records = service.parse_json(SAMPLE_JSON).unwrap();

        service.import_records(&records).unwrap();
        let again = service.import_records(&records).unwrap();

        assert_eq!(again.imported, 0);
        assert_eq!(again.duplicates_skipped, 3);
        assert_eq!(again.users_created, 0);
        assert_eq!(storage.transactions.count().unwrap(), 3);
    }

    #[test]
    fn test_invalid_records_are_reported() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);
        let records = service
            .parse_json(
                r#"[
                {"id": "", "user_id": 1, "amount": -1, "timestamp": "2025-01-01"},
                {"id": "ok", "user_id": 1, "amount": -1, "timestamp": "2025-01-01"},
                {"id": "bad-ts", "user_id": 1, "amount": -1, "timestamp": "yesterday"}
            ]"#,
            )
            .unwrap();

        let result = service.import_records(&records).unwrap();
        assert_eq!(result.imported, 1);
        assert_eq!(result.errors, 2);
        assert_eq!(result.error_messages[0].0, 0);
        assert_eq!(result.error_messages[1].0, 2);
    }

    #[test]
    fn test_oversized_amounts_are_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);
        let records = service
            .parse_json(
                r#"[
                {"id": "big-1", "user_id": 1, "amount": -7e28, "timestamp": "2025-01-01"},
                {"id": "big-2", "user_id": 1, "amount": -7e28, "timestamp": "2025-01-01"},
                {"id": "small", "user_id": 1, "amount": -5, "timestamp": "2025-01-01"}
            ]"#,
            )
            .unwrap();

        let result = service.import_records(&records).unwrap();
        assert_eq!(result.imported, 1);
        assert_eq!(result.errors, 2);
        assert!(result.error_messages[0].1.contains("exceeds the limit"));
    }

    #[test]
    fn test_json_category_kept_verbatim() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);
        let records = service
            .parse_json(
                r#"[
                {"id": "a", "user_id": 1, "amount": -1, "category": " food", "timestamp": "2025-01-01"},
                {"id": "b", "user_id": 1, "amount": -1, "category": "", "timestamp": "2025-01-01"}
            ]"#,
            )
            .unwrap();

        assert_eq!(records[0].to_transaction().unwrap().category.as_deref(), Some(" food"));
        assert_eq!(records[1].to_transaction().unwrap().category, None);
    }

    #[test]
    fn test_seed_only_when_empty() {
        let (temp_dir, storage) = create_test_storage();
        let seed = temp_dir.path().join("seed.json");
        std::fs::write(&seed, SAMPLE_JSON).unwrap();
        let service = ImportService::new(&storage);

        let first = service.seed_if_empty(&seed).unwrap();
        assert_eq!(first.map(|r| r.imported), Some(3));

        assert!(service.seed_if_empty(&seed).unwrap().is_none());
        assert!(service
            .seed_if_empty(&temp_dir.path().join("missing.json"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ImportFormat::from_path(Path::new("a.CSV")), ImportFormat::Csv);
        assert_eq!(ImportFormat::from_path(Path::new("a.json")), ImportFormat::Json);
        assert_eq!(ImportFormat::from_path(Path::new("data")), ImportFormat::Json);
    }
}
