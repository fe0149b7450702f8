//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TrackerError;
use crate::models::{Transaction, TransactionId, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with indexing
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: owner -> transaction_ids
    by_owner: RwLock<HashMap<UserId, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_owner: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the owner index
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_owner = self
            .by_owner
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_owner.clear();

        for txn in file_data.transactions {
            by_owner.entry(txn.owner).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        let file_data = TransactionData { transactions };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(transactions)
    }

    /// Get an owner's transactions, newest first
    pub fn get_by_owner(&self, owner: UserId) -> Result<Vec<Transaction>, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_owner = self
            .by_owner
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_owner.get(&owner).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(transactions)
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), TrackerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_owner = self
            .by_owner
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        // Remove from old index if updating
        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_owner.get_mut(&old.owner) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_owner.entry(txn.owner).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> Result<bool, TrackerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_owner = self
            .by_owner
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(txn) = data.remove(&id) {
            if let Some(ids) = by_owner.get_mut(&txn.owner) {
                ids.retain(|&tid| tid != id);
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(owner: UserId, title: &str, cents: i64, day: u32) -> Transaction {
        Transaction::expense(
            owner,
            title,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            Category::Food,
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let txn = expense(UserId::new(), "Groceries", 5000, 15);
        let id = txn.id;

        repo.upsert(txn).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 5000);
        assert_eq!(retrieved.title, "Groceries");
    }

    #[test]
    fn test_get_by_owner() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let owner1 = UserId::new();
        let owner2 = UserId::new();

        repo.upsert(expense(owner1, "Lunch", 100, 15)).unwrap();
        repo.upsert(expense(owner1, "Dinner", 200, 16)).unwrap();
        repo.upsert(expense(owner2, "Coffee", 300, 15)).unwrap();

        let owner1_txns = repo.get_by_owner(owner1).unwrap();
        assert_eq!(owner1_txns.len(), 2);

        let owner2_txns = repo.get_by_owner(owner2).unwrap();
        assert_eq!(owner2_txns.len(), 1);
    }

    #[test]
    fn test_get_by_owner_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let owner = UserId::new();
        repo.upsert(expense(owner, "Old", 100, 5)).unwrap();
        repo.upsert(expense(owner, "New", 200, 25)).unwrap();
        repo.upsert(expense(owner, "Middle", 300, 15)).unwrap();

        let txns = repo.get_by_owner(owner).unwrap();
        let titles: Vec<&str> = txns.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["New", "Middle", "Old"]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let owner = UserId::new();
        let txn = expense(owner, "Groceries", 5000, 15);
        let id = txn.id;

        repo.upsert(txn).unwrap();
        repo.save().unwrap();

        // Create new repo and load
        let path = temp_dir.path().join("transactions.json");
        let repo2 = TransactionRepository::new(path);
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        let retrieved = repo2.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 5000);
        assert_eq!(repo2.get_by_owner(owner).unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let mut txn = expense(UserId::new(), "Grceries", 5000, 15);
        let id = txn.id;
        repo.upsert(txn.clone()).unwrap();

        txn.set_title("Groceries");
        repo.upsert(txn).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.get(id).unwrap().unwrap().title, "Groceries");
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let owner = UserId::new();
        let txn = expense(owner, "Groceries", 5000, 15);
        let id = txn.id;

        repo.upsert(txn).unwrap();
        assert_eq!(repo.count().unwrap(), 1);

        assert!(repo.delete(id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.get_by_owner(owner).unwrap().is_empty());

        assert!(!repo.delete(id).unwrap());
    }
}
