//! Storage layer for the expense tracker
//!
//! Provides JSON file storage with atomic writes and automatic
//! directory creation.

pub mod budgets;
pub mod file_io;
pub mod todos;
pub mod transactions;

pub use budgets::{BudgetKey, BudgetRepository};
pub use file_io::{read_json, write_json_atomic};
pub use todos::TodoRepository;
pub use transactions::TransactionRepository;

use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TrackerPaths,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
    pub todos: TodoRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TrackerPaths) -> Result<Self, TrackerError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            todos: TodoRepository::new(paths.todos_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), TrackerError> {
        self.transactions.load()?;
        self.budgets.load()?;
        self.todos.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), TrackerError> {
        self.transactions.save()?;
        self.budgets.save()?;
        self.todos.save()?;
        Ok(())
    }

    /// Check if storage has been initialized (settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryBudget, FinancialTodo, Money, Transaction, UserId};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_save_all_and_load_all() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();

        let owner = UserId::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        storage
            .transactions
            .upsert(Transaction::expense(
                owner,
                "Groceries",
                Money::from_cents(5_000),
                date,
                Category::Food,
            ))
            .unwrap();
        storage
            .budgets
            .upsert(CategoryBudget::new(
                owner,
                Category::Food,
                Money::from_cents(100_000),
                3,
                2024,
            ))
            .unwrap();
        storage
            .todos
            .upsert(FinancialTodo::new(owner, "Pay rent"))
            .unwrap();

        storage.save_all().unwrap();

        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();

        assert_eq!(reloaded.transactions.count().unwrap(), 1);
        assert_eq!(reloaded.budgets.count().unwrap(), 1);
        assert_eq!(reloaded.todos.count().unwrap(), 1);
    }
}
